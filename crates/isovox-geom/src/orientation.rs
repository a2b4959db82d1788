/// Direction the viewer looks at the world. Ordered clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(u8)]
pub enum ViewOrientation {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl ViewOrientation {
    pub const COUNT: u8 = 4;
    pub const ALL: [ViewOrientation; 4] = [
        ViewOrientation::North,
        ViewOrientation::East,
        ViewOrientation::South,
        ViewOrientation::West,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Panics on an index outside `0..4`; such a value is a caller defect.
    #[inline]
    pub fn from_index(index: u8) -> ViewOrientation {
        match index {
            0 => ViewOrientation::North,
            1 => ViewOrientation::East,
            2 => ViewOrientation::South,
            3 => ViewOrientation::West,
            _ => unreachable!("invalid view orientation index {index}"),
        }
    }

    pub fn from_name(s: &str) -> Option<ViewOrientation> {
        match s {
            "north" => Some(ViewOrientation::North),
            "east" => Some(ViewOrientation::East),
            "south" => Some(ViewOrientation::South),
            "west" => Some(ViewOrientation::West),
            _ => None,
        }
    }

    /// One quarter turn; positive `direction` turns clockwise.
    #[inline]
    pub fn rotate(self, direction: i32) -> ViewOrientation {
        let step = if direction > 0 { 1 } else { Self::COUNT - 1 };
        Self::from_index((self.index() + step) % Self::COUNT)
    }

    /// Sign of the world x term in the depth key.
    #[inline]
    pub fn depth_sign_x(self) -> i32 {
        match self {
            ViewOrientation::North | ViewOrientation::East => 1,
            ViewOrientation::South | ViewOrientation::West => -1,
        }
    }

    /// Sign of the world y term in the depth key.
    #[inline]
    pub fn depth_sign_y(self) -> i32 {
        match self {
            ViewOrientation::North | ViewOrientation::West => 1,
            ViewOrientation::South | ViewOrientation::East => -1,
        }
    }
}
