use isovox_geom::ViewOrientation;

/// Ground covering of a surface voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroundType {
    /// No ground; the voxel draws nothing.
    #[default]
    Invalid,
    Grass,
    Dry,
    Sand,
    Rock,
}

impl GroundType {
    /// Every drawable ground type.
    pub const VALID: [GroundType; 4] = [
        GroundType::Grass,
        GroundType::Dry,
        GroundType::Sand,
        GroundType::Rock,
    ];

    #[inline]
    pub fn is_valid(self) -> bool {
        self != GroundType::Invalid
    }

    pub fn from_name(s: &str) -> Option<GroundType> {
        match s {
            "grass" => Some(GroundType::Grass),
            "dry" => Some(GroundType::Dry),
            "sand" => Some(GroundType::Sand),
            "rock" => Some(GroundType::Rock),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GroundType::Invalid => "invalid",
            GroundType::Grass => "grass",
            GroundType::Dry => "dry",
            GroundType::Sand => "sand",
            GroundType::Rock => "rock",
        }
    }
}

/// Raised corners of a tile.
///
/// Bits 0..4 mark the north, east, south and west corner as one level up. With
/// [`Slope::STEEP`] set exactly one corner bit is present; that corner is two
/// levels up and its neighbours one level.
///
/// Corners are stored in world terms; [`Slope::to_view`] turns them into the
/// corners as seen on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slope(pub u8);

impl Slope {
    pub const FLAT: Slope = Slope(0);
    pub const NORTH: u8 = 1;
    pub const EAST: u8 = 2;
    pub const SOUTH: u8 = 4;
    pub const WEST: u8 = 8;
    pub const STEEP: u8 = 16;
    const CORNERS: u8 = 0x0F;

    #[inline]
    pub fn is_steep(self) -> bool {
        self.0 & Self::STEEP != 0
    }

    #[inline]
    pub fn corner_bits(self) -> u8 {
        self.0 & Self::CORNERS
    }

    /// A slope is valid if it is not raised everywhere and a steep slope names
    /// a single top corner.
    pub fn is_valid(self) -> bool {
        if self.0 & !(Self::CORNERS | Self::STEEP) != 0 {
            return false;
        }
        let corners = self.corner_bits();
        if self.is_steep() {
            corners.count_ones() == 1
        } else {
            corners != Self::CORNERS
        }
    }

    /// Height of each corner (north, east, south, west) above the tile base.
    pub fn corner_heights(self) -> [i32; 4] {
        let corners = self.corner_bits();
        if self.is_steep() {
            let top = corners.trailing_zeros() as usize;
            let mut h = [1; 4];
            h[top] = 2;
            h[(top + 2) % 4] = 0;
            return h;
        }
        core::array::from_fn(|i| ((corners >> i) & 1) as i32)
    }

    /// Rotate world corners into view corners; view north is the corner drawn
    /// at the top of the screen.
    pub fn to_view(self, orient: ViewOrientation) -> Slope {
        let shift = orient.index();
        let corners = self.corner_bits();
        let rotated = ((corners >> shift) | (corners << (4 - shift))) & Self::CORNERS;
        Slope(rotated | (self.0 & Self::STEEP))
    }

    /// Every valid slope, flat first.
    pub fn all() -> impl Iterator<Item = Slope> {
        (0u8..32).map(Slope).filter(|s| s.is_valid())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceVoxel {
    pub ground: GroundType,
    pub slope: Slope,
}

/// Content of one voxel. Only surfaces are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Voxel {
    #[default]
    Empty,
    Surface(SurfaceVoxel),
}

impl Voxel {
    #[inline]
    pub fn surface(ground: GroundType, slope: Slope) -> Voxel {
        Voxel::Surface(SurfaceVoxel { ground, slope })
    }

    #[inline]
    pub fn as_surface(&self) -> Option<&SurfaceVoxel> {
        match self {
            Voxel::Surface(s) => Some(s),
            Voxel::Empty => None,
        }
    }
}

/// Vertical column of voxels. `voxels[i]` sits at height `base + i`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelStack {
    pub base: i32,
    pub voxels: Vec<Voxel>,
}

impl VoxelStack {
    #[inline]
    pub fn height(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn get(&self, z: i32) -> Option<&Voxel> {
        let idx = usize::try_from(z - self.base).ok()?;
        self.voxels.get(idx)
    }

    /// Store `voxel` at height `z`, growing the column with empty voxels as needed.
    pub fn set(&mut self, z: i32, voxel: Voxel) {
        if self.voxels.is_empty() {
            self.base = z;
        } else if z < self.base {
            let grow = (self.base - z) as usize;
            self.voxels
                .splice(0..0, core::iter::repeat_n(Voxel::Empty, grow));
            self.base = z;
        }
        let idx = (z - self.base) as usize;
        if idx >= self.voxels.len() {
            self.voxels.resize(idx + 1, Voxel::Empty);
        }
        self.voxels[idx] = voxel;
    }

    /// Iterate `(height, voxel)` bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Voxel)> + '_ {
        self.voxels
            .iter()
            .enumerate()
            .map(move |(i, v)| (self.base + i as i32, v))
    }
}
