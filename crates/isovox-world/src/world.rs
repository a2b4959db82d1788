use crate::voxel::{GroundType, Slope, Voxel, VoxelStack};

/// Read-only view of the world as the renderer needs it.
pub trait WorldAccess {
    /// Number of tiles along world x.
    fn x_size(&self) -> u16;
    /// Number of tiles along world y.
    fn y_size(&self) -> u16;
    /// Column at `(x, y)`; callers stay inside `x_size() * y_size()`.
    fn stack(&self, x: u16, y: u16) -> &VoxelStack;
}

/// Dense in-memory world of `x_size * y_size` stacks.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorld {
    x_size: u16,
    y_size: u16,
    stacks: Vec<VoxelStack>,
}

impl VoxelWorld {
    pub fn new(x_size: u16, y_size: u16) -> Self {
        Self {
            x_size,
            y_size,
            stacks: vec![VoxelStack::default(); x_size as usize * y_size as usize],
        }
    }

    /// Single-level world with the same ground everywhere.
    pub fn flat(x_size: u16, y_size: u16, height: i32, ground: GroundType) -> Self {
        let mut world = Self::new(x_size, y_size);
        for stack in world.stacks.iter_mut() {
            stack.set(height, Voxel::surface(ground, Slope::FLAT));
        }
        world
    }

    #[inline]
    fn idx(&self, x: u16, y: u16) -> usize {
        debug_assert!(x < self.x_size && y < self.y_size);
        y as usize * self.x_size as usize + x as usize
    }

    #[inline]
    pub fn stack_mut(&mut self, x: u16, y: u16) -> &mut VoxelStack {
        let i = self.idx(x, y);
        &mut self.stacks[i]
    }

    pub fn set_voxel(&mut self, x: u16, y: u16, z: i32, voxel: Voxel) {
        self.stack_mut(x, y).set(z, voxel);
    }

    pub fn set_surface(&mut self, x: u16, y: u16, z: i32, ground: GroundType, slope: Slope) {
        self.set_voxel(x, y, z, Voxel::surface(ground, slope));
    }

    /// Lowest and highest occupied level over all columns.
    pub fn height_range(&self) -> Option<(i32, i32)> {
        self.stacks
            .iter()
            .filter(|s| s.height() > 0)
            .map(|s| (s.base, s.base + s.height() as i32 - 1))
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
    }
}

impl WorldAccess for VoxelWorld {
    #[inline]
    fn x_size(&self) -> u16 {
        self.x_size
    }

    #[inline]
    fn y_size(&self) -> u16 {
        self.y_size
    }

    #[inline]
    fn stack(&self, x: u16, y: u16) -> &VoxelStack {
        &self.stacks[self.idx(x, y)]
    }
}
