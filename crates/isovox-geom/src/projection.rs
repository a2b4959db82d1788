//! World (fixed point, 256 units per voxel) to screen projection.

use crate::{Point, VOXEL_UNITS, ViewOrientation};

/// Isometric projection for one orientation and zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projector {
    /// Width of a flat tile on screen, in pixels.
    pub tile_width: i32,
    /// Screen height of one voxel level, in pixels.
    pub tile_height: i32,
    pub orient: ViewOrientation,
}

impl Projector {
    #[inline]
    pub const fn new(tile_width: i32, tile_height: i32, orient: ViewOrientation) -> Self {
        Self {
            tile_width,
            tile_height,
            orient,
        }
    }

    /// Projector with the conventional `tile_height = tile_width / 4`.
    #[inline]
    pub const fn with_tile_width(tile_width: i32, orient: ViewOrientation) -> Self {
        Self::new(tile_width, tile_width / 4, orient)
    }

    /// Horizontal screen position of world point `(x, y)`.
    #[inline]
    pub fn screen_x(&self, x: i32, y: i32) -> i32 {
        let h = match self.orient {
            ViewOrientation::North => y - x,
            ViewOrientation::West => -(x + y),
            ViewOrientation::South => x - y,
            ViewOrientation::East => x + y,
        };
        (h * self.tile_width / 2) >> 8
    }

    /// Vertical screen position of world point `(x, y, z)`.
    #[inline]
    pub fn screen_y(&self, x: i32, y: i32, z: i32) -> i32 {
        let v = match self.orient {
            ViewOrientation::North => x + y,
            ViewOrientation::West => y - x,
            ViewOrientation::South => -(x + y),
            ViewOrientation::East => x - y,
        };
        (v * self.tile_width / 4 - z * self.tile_height) >> 8
    }

    #[inline]
    pub fn project(&self, x: i32, y: i32, z: i32) -> Point {
        Point::new(self.screen_x(x, y), self.screen_y(x, y, z))
    }

    /// World position of the corner of column `(xpos, ypos)` that is drawn at
    /// the top of the screen for the current orientation.
    #[inline]
    pub fn column_anchor(&self, xpos: i32, ypos: i32) -> (i32, i32) {
        let dx = matches!(self.orient, ViewOrientation::South | ViewOrientation::West) as i32;
        let dy = matches!(self.orient, ViewOrientation::South | ViewOrientation::East) as i32;
        ((xpos + dx) * VOXEL_UNITS, (ypos + dy) * VOXEL_UNITS)
    }

    /// Painter's order key: larger means nearer to the viewer.
    #[inline]
    pub fn depth_key(&self, xpos: i32, ypos: i32, zpos: i32) -> i32 {
        let sx = self.orient.depth_sign_x() * VOXEL_UNITS;
        let sy = self.orient.depth_sign_y() * VOXEL_UNITS;
        sx * xpos + sy * ypos + zpos * VOXEL_UNITS
    }
}
