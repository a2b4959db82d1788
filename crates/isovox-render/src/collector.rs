use isovox_geom::{Point, Projector, Rect, VoxelCoord};
use isovox_world::{Voxel, WorldAccess};

/// Receives every voxel that survives culling, in world order.
pub trait VoxelVisitor {
    /// `north` is the screen position of the voxel's north corner for the
    /// current orientation.
    fn visit(&mut self, voxel: &Voxel, coord: VoxelCoord, north: Point);
}

/// Center of the view in world units (256 per voxel edge).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewCenter {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ViewCenter {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Counters of one collection pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub columns_visited: usize,
    pub columns_culled: usize,
    pub voxels_visited: usize,
    pub voxels_culled: usize,
}

/// Walks the world and hands visible voxels to a [`VoxelVisitor`].
#[derive(Clone, Copy, Debug)]
pub struct VoxelCollector {
    pub center: ViewCenter,
    pub projector: Projector,
    /// Screen area of interest, in projected coordinates.
    pub rect: Rect,
}

impl VoxelCollector {
    pub fn new(center: ViewCenter, projector: Projector) -> Self {
        Self {
            center,
            projector,
            rect: Rect::default(),
        }
    }

    /// Area of `width * height` pixels whose top-left corner is `(xpos, ypos)`
    /// away from the projected view center.
    pub fn set_window_size(&mut self, xpos: i32, ypos: i32, width: i32, height: i32) {
        let c = self.center;
        self.rect = Rect::new(
            self.projector.screen_x(c.x, c.y) + xpos,
            self.projector.screen_y(c.x, c.y, c.z) + ypos,
            width,
            height,
        );
    }

    /// Visit the voxels that may show up inside [`Self::rect`]: x ascending,
    /// then y, then height.
    pub fn collect(&self, world: &dyn WorldAccess, visitor: &mut dyn VoxelVisitor) -> CollectStats {
        let p = &self.projector;
        let half_width = p.tile_width / 2;
        let mut stats = CollectStats::default();
        for xpos in 0..world.x_size() {
            for ypos in 0..world.y_size() {
                let (world_x, world_y) = p.column_anchor(xpos as i32, ypos as i32);
                let north_x = p.screen_x(world_x, world_y);
                if north_x + half_width <= self.rect.x
                    || north_x - half_width >= self.rect.right()
                {
                    stats.columns_culled += 1;
                    continue;
                }
                stats.columns_visited += 1;

                let stack = world.stack(xpos, ypos);
                for (count, (zpos, voxel)) in stack.iter().enumerate() {
                    let north_y = p.screen_y(world_x, world_y, zpos * 256);
                    // Steep tiles reach two levels above their base.
                    if north_y - 2 * p.tile_height >= self.rect.bottom() {
                        stats.voxels_culled += 1;
                        continue;
                    }
                    // Above the area, and every higher voxel is further up.
                    if north_y + half_width + p.tile_height <= self.rect.y {
                        stats.voxels_culled += stack.height() - count;
                        break;
                    }
                    stats.voxels_visited += 1;
                    visitor.visit(
                        voxel,
                        VoxelCoord::new(xpos as i32, ypos as i32, zpos),
                        Point::new(north_x, north_y),
                    );
                }
            }
        }
        log::trace!("collected {:?} in {:?}", stats, self.rect);
        stats
    }
}
