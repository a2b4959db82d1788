use core::ops::BitOr;

/// How the viewport reacts to the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum MouseMode {
    /// Pointer input is ignored.
    #[default]
    Inactive,
    /// Track the ground tile under the pointer; right-drag pans.
    TileTerraform,
}

impl MouseMode {
    pub const COUNT: u8 = 2;

    /// Panics on an index outside `0..COUNT`.
    pub fn from_index(index: u8) -> MouseMode {
        match index {
            0 => MouseMode::Inactive,
            1 => MouseMode::TileTerraform,
            _ => panic!("mouse mode index {index} out of range"),
        }
    }

    pub fn from_name(s: &str) -> Option<MouseMode> {
        match s {
            "inactive" => Some(MouseMode::Inactive),
            "terraform" | "tile_terraform" => Some(MouseMode::TileTerraform),
            _ => None,
        }
    }

    /// The other mode.
    pub fn toggled(self) -> MouseMode {
        match self {
            MouseMode::Inactive => MouseMode::TileTerraform,
            MouseMode::TileTerraform => MouseMode::Inactive,
        }
    }
}

/// Bit set of pressed mouse buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MouseButtons(pub u8);

impl MouseButtons {
    pub const NONE: MouseButtons = MouseButtons(0);
    pub const LEFT: MouseButtons = MouseButtons(1);
    pub const MIDDLE: MouseButtons = MouseButtons(2);
    pub const RIGHT: MouseButtons = MouseButtons(4);
    /// Every button the viewport tracks.
    pub const CURRENT: MouseButtons = MouseButtons(0x07);

    /// Keep only the tracked buttons of a raw state byte.
    #[inline]
    pub fn from_state(state: u8) -> MouseButtons {
        MouseButtons(state & Self::CURRENT.0)
    }

    #[inline]
    pub fn contains(self, other: MouseButtons) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MouseButtons {
    type Output = MouseButtons;
    #[inline]
    fn bitor(self, rhs: MouseButtons) -> MouseButtons {
        MouseButtons(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_is_masked() {
        let b = MouseButtons::from_state(0xFC);
        assert_eq!(b, MouseButtons::RIGHT);
        assert!(b.contains(MouseButtons::RIGHT));
        assert!(!b.contains(MouseButtons::LEFT));
        assert!(MouseButtons::from_state(0xF8).is_empty());
        assert!((MouseButtons::LEFT | MouseButtons::MIDDLE).contains(MouseButtons::MIDDLE));
    }

    #[test]
    fn mode_indices() {
        assert_eq!(MouseMode::from_index(0), MouseMode::Inactive);
        assert_eq!(MouseMode::from_index(1), MouseMode::TileTerraform);
        assert_eq!(MouseMode::from_name("terraform"), Some(MouseMode::TileTerraform));
        assert_eq!(MouseMode::Inactive.toggled().toggled(), MouseMode::Inactive);
    }

    #[test]
    #[should_panic]
    fn mode_index_out_of_range() {
        let _ = MouseMode::from_index(MouseMode::COUNT);
    }
}
