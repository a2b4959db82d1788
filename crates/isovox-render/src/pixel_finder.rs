use isovox_geom::{Point, Projector, Rect, VoxelCoord};
use isovox_sprites::SpriteProvider;
use isovox_world::{Voxel, WorldAccess};

use crate::collector::{ViewCenter, VoxelCollector, VoxelVisitor};

/// Nearest opaque voxel under a screen position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickResult {
    pub distance: i32,
    pub voxel: VoxelCoord,
    /// Palette index of the hit pixel.
    pub pixel: u8,
}

/// Finds the voxel whose sprite covers the top-left pixel of the search area.
pub struct PixelFinder<'a> {
    collector: VoxelCollector,
    world: &'a dyn WorldAccess,
    sprites: &'a dyn SpriteProvider,
    found: Option<PickResult>,
}

impl<'a> PixelFinder<'a> {
    pub fn new(
        world: &'a dyn WorldAccess,
        sprites: &'a dyn SpriteProvider,
        center: ViewCenter,
        projector: Projector,
    ) -> Self {
        Self {
            collector: VoxelCollector::new(center, projector),
            world,
            sprites,
            found: None,
        }
    }

    /// See [`VoxelCollector::set_window_size`].
    pub fn set_window_size(&mut self, xpos: i32, ypos: i32, width: i32, height: i32) {
        self.collector.set_window_size(xpos, ypos, width, height);
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.collector.rect
    }

    pub fn find(mut self) -> Option<PickResult> {
        let world = self.world;
        let collector = self.collector;
        collector.collect(world, &mut self);
        self.found
    }
}

impl<'a> VoxelVisitor for PixelFinder<'a> {
    fn visit(&mut self, voxel: &Voxel, coord: VoxelCoord, north: Point) {
        let Some(surface) = voxel.as_surface() else {
            return;
        };
        if !surface.ground.is_valid() {
            return;
        }
        let p = &self.collector.projector;
        let sprite = self.sprites.surface_sprite(
            surface.ground,
            surface.slope,
            p.tile_width as u16,
            p.orient,
        );
        let Some(sprite) = sprite else {
            return;
        };
        let distance = p.depth_key(coord.x, coord.y, coord.z);
        if self.found.is_some_and(|f| distance <= f.distance) {
            return;
        }
        let probe = self.collector.rect.top_left() - north - sprite.origin();
        if probe.x < 0 || probe.y < 0 {
            return;
        }
        let pixel = sprite.get_pixel(probe.x, probe.y);
        if pixel == 0 {
            return;
        }
        self.found = Some(PickResult {
            distance,
            voxel: coord,
            pixel,
        });
    }
}
