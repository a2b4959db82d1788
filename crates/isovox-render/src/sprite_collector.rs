use isovox_geom::{Point, Projector, VoxelCoord};
use isovox_sprites::{Sprite, SpriteProvider};
use isovox_world::{Voxel, WorldAccess};

use crate::collector::{CollectStats, ViewCenter, VoxelCollector, VoxelVisitor};

/// One image to blit, with an optional cursor overlay drawn right after it.
#[derive(Clone, Copy, Debug)]
pub struct DrawCommand<'a> {
    pub sprite: &'a Sprite,
    pub cursor: Option<&'a Sprite>,
    /// Top-left of the image relative to the display.
    pub base: Point,
    pub depth: i32,
    pub voxel: VoxelCoord,
}

/// Draw commands ordered back to front. Equal depths keep collection order.
#[derive(Clone, Debug, Default)]
pub struct DrawImages<'a> {
    commands: Vec<DrawCommand<'a>>,
    pub stats: CollectStats,
}

impl<'a> DrawImages<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand<'a>> {
        self.commands.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[DrawCommand<'a>] {
        &self.commands
    }
}

impl<'s, 'a> IntoIterator for &'s DrawImages<'a> {
    type Item = &'s DrawCommand<'a>;
    type IntoIter = std::slice::Iter<'s, DrawCommand<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Gathers the sprites of the visible voxels.
pub struct SpriteCollector<'a> {
    collector: VoxelCollector,
    world: &'a dyn WorldAccess,
    sprites: &'a dyn SpriteProvider,
    offset: Point,
    mouse_cursor: Option<VoxelCoord>,
    commands: Vec<DrawCommand<'a>>,
}

impl<'a> SpriteCollector<'a> {
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
            offset: Point::ZERO,
            mouse_cursor: None,
            commands: Vec::new(),
        }
    }

    /// See [`VoxelCollector::set_window_size`].
    pub fn set_window_size(&mut self, xpos: i32, ypos: i32, width: i32, height: i32) {
        self.collector.set_window_size(xpos, ypos, width, height);
    }

    /// Display position of the collected area's top-left corner.
    pub fn set_xy_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Overlay the cursor on the ground of `voxel`.
    pub fn set_mouse_cursor(&mut self, voxel: VoxelCoord) {
        self.mouse_cursor = Some(voxel);
    }

    pub fn collect(mut self) -> DrawImages<'a> {
        let world = self.world;
        let collector = self.collector;
        let stats = collector.collect(world, &mut self);
        // Stable: voxels at equal depth stay in world order.
        self.commands.sort_by_key(|c| c.depth);
        DrawImages {
            commands: self.commands,
            stats,
        }
    }
}

impl<'a> VoxelVisitor for SpriteCollector<'a> {
    fn visit(&mut self, voxel: &Voxel, coord: VoxelCoord, north: Point) {
        let Some(surface) = voxel.as_surface() else {
            return;
        };
        if !surface.ground.is_valid() {
            return;
        }
        let p = &self.collector.projector;
        let tile_width = p.tile_width as u16;
        let sprite = self
            .sprites
            .surface_sprite(surface.ground, surface.slope, tile_width, p.orient);
        let Some(sprite) = sprite else {
            return;
        };
        let cursor = match self.mouse_cursor {
            Some(m) if m == coord => {
                self.sprites.cursor_sprite(surface.slope, tile_width, p.orient)
            }
            _ => None,
        };
        self.commands.push(DrawCommand {
            sprite,
            cursor,
            base: self.offset + north + sprite.origin() - self.collector.rect.top_left(),
            depth: p.depth_key(coord.x, coord.y, coord.z),
            voxel: coord,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isovox_geom::ViewOrientation;
    use isovox_world::{GroundType, Slope, VoxelWorld};

    struct Tiles {
        surface: Sprite,
        cursor: Sprite,
    }

    impl SpriteProvider for Tiles {
        fn surface_sprite(
            &self,
            ground: GroundType,
            _slope: Slope,
            _tile_width: u16,
            _orient: ViewOrientation,
        ) -> Option<&Sprite> {
            (ground != GroundType::Sand).then_some(&self.surface)
        }

        fn cursor_sprite(
            &self,
            _slope: Slope,
            _tile_width: u16,
            _orient: ViewOrientation,
        ) -> Option<&Sprite> {
            Some(&self.cursor)
        }
    }

    fn tiles() -> Tiles {
        Tiles {
            surface: Sprite::filled(64, 48, -32, -16, 3),
            cursor: Sprite::filled(64, 48, -32, -16, 1),
        }
    }

    fn collect<'a>(
        world: &'a VoxelWorld,
        tiles: &'a Tiles,
        cursor: Option<VoxelCoord>,
    ) -> DrawImages<'a> {
        let mut c = SpriteCollector::new(
            world,
            tiles,
            ViewCenter::new(256, 256, 0),
            Projector::with_tile_width(64, ViewOrientation::North),
        );
        c.set_window_size(-100, -100, 200, 200);
        c.set_xy_offset(Point::new(5, 7));
        if let Some(v) = cursor {
            c.set_mouse_cursor(v);
        }
        c.collect()
    }

    #[test]
    fn base_is_relative_to_the_window() {
        let world = VoxelWorld::flat(1, 1, 0, GroundType::Grass);
        let tiles = tiles();
        let images = collect(&world, &tiles, None);
        assert_eq!(images.len(), 1);
        // rect top-left is (0 - 100, 32 - 100); north corner of (0,0,0) is (0,0).
        assert_eq!(images.as_slice()[0].base, Point::new(5 - 32 + 100, 7 - 16 + 68));
        assert!(images.as_slice()[0].cursor.is_none());
    }

    #[test]
    fn missing_sprites_draw_nothing() {
        let mut world = VoxelWorld::new(2, 1);
        world.set_surface(0, 0, 0, GroundType::Sand, Slope::FLAT);
        world.set_surface(1, 0, 0, GroundType::Invalid, Slope::FLAT);
        let tiles = tiles();
        assert!(collect(&world, &tiles, None).is_empty());
    }

    #[test]
    fn cursor_only_on_tracked_voxel() {
        let world = VoxelWorld::flat(2, 2, 0, GroundType::Grass);
        let tiles = tiles();
        let images = collect(&world, &tiles, Some(VoxelCoord::new(1, 0, 0)));
        let with_cursor: Vec<VoxelCoord> = images
            .iter()
            .filter(|c| c.cursor.is_some())
            .map(|c| c.voxel)
            .collect();
        assert_eq!(with_cursor, vec![VoxelCoord::new(1, 0, 0)]);
    }

    #[test]
    fn sorted_back_to_front_stably() {
        let world = VoxelWorld::flat(3, 3, 0, GroundType::Grass);
        let tiles = tiles();
        let images = collect(&world, &tiles, None);
        let cmds = images.as_slice();
        for pair in cmds.windows(2) {
            assert!(pair[0].depth <= pair[1].depth);
            if pair[0].depth == pair[1].depth {
                // World order: x first, then y.
                assert!((pair[0].voxel.x, pair[0].voxel.y) < (pair[1].voxel.x, pair[1].voxel.y));
            }
        }
    }
}
