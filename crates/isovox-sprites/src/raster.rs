//! Procedural tile images: a (possibly sloped) diamond split into two triangles.

use isovox_world::Slope;

use crate::sprite::Sprite;

/// Screen corners of a tile (north, east, south, west) relative to the north
/// corner of its base level.
fn tile_corners(tile_width: i32, view_slope: Slope) -> [(i32, i32); 4] {
    let tile_height = tile_width / 4;
    let h = view_slope.corner_heights();
    [
        (0, -h[0] * tile_height),
        (tile_width / 2, tile_width / 4 - h[1] * tile_height),
        (0, tile_width / 2 - h[2] * tile_height),
        (-tile_width / 2, tile_width / 4 - h[3] * tile_height),
    ]
}

#[inline]
fn edge(a: (i32, i32), b: (i32, i32), p: (i32, i32)) -> i64 {
    (b.0 - a.0) as i64 * (p.1 - a.1) as i64 - (b.1 - a.1) as i64 * (p.0 - a.0) as i64
}

/// Inclusive point-in-triangle test, either winding.
fn in_triangle(t: [(i32, i32); 3], p: (i32, i32)) -> bool {
    let e0 = edge(t[0], t[1], p);
    let e1 = edge(t[1], t[2], p);
    let e2 = edge(t[2], t[0], p);
    (e0 >= 0 && e1 >= 0 && e2 >= 0) || (e0 <= 0 && e1 <= 0 && e2 <= 0)
}

/// Image frame shared by every tile of a width: wide enough for the diamond,
/// tall enough for a steep corner two levels up.
fn frame(tile_width: i32) -> (u16, u16, i32, i32) {
    let tile_height = tile_width / 4;
    let x_offset = -tile_width / 2;
    let y_offset = -2 * tile_height;
    let width = tile_width + 1;
    let height = tile_width / 2 + 2 * tile_height + 1;
    (width as u16, height as u16, x_offset, y_offset)
}

/// Shade (0 lightest) of the west and east half of a tile; light comes from the
/// upper left of the screen.
fn half_shades(view_slope: Slope) -> (u8, u8) {
    let h = view_slope.corner_heights();
    let west = 1 + 2 * h[3] - h[0] - h[2];
    let east = 1 + h[0] + h[2] - 2 * h[1];
    (west.clamp(0, 3) as u8, east.clamp(0, 3) as u8)
}

/// Surface tile filled with `shade_index(shade)` per half.
pub fn surface_sprite(
    tile_width: u16,
    view_slope: Slope,
    shade_index: impl Fn(u8) -> u8,
) -> Sprite {
    let tw = tile_width as i32;
    let (width, height, x_offset, y_offset) = frame(tw);
    let [n, e, s, w] = tile_corners(tw, view_slope);
    let (west_shade, east_shade) = half_shades(view_slope);
    let (west_px, east_px) = (shade_index(west_shade), shade_index(east_shade));
    let mut pixels = vec![0u8; width as usize * height as usize];
    for py in 0..height as i32 {
        for px in 0..width as i32 {
            let p = (px + x_offset, py + y_offset);
            let value = if in_triangle([n, s, w], p) {
                west_px
            } else if in_triangle([n, e, s], p) {
                east_px
            } else {
                continue;
            };
            pixels[py as usize * width as usize + px as usize] = value;
        }
    }
    Sprite::new(width, height, x_offset, y_offset, pixels)
}

/// Outline of the tile in `index`, everything else transparent.
pub fn cursor_sprite(tile_width: u16, view_slope: Slope, index: u8) -> Sprite {
    let tw = tile_width as i32;
    let (width, height, x_offset, y_offset) = frame(tw);
    let [n, e, s, w] = tile_corners(tw, view_slope);
    let inside = |px: i32, py: i32| {
        let p = (px + x_offset, py + y_offset);
        in_triangle([n, s, w], p) || in_triangle([n, e, s], p)
    };
    let mut pixels = vec![0u8; width as usize * height as usize];
    for py in 0..height as i32 {
        for px in 0..width as i32 {
            if !inside(px, py) {
                continue;
            }
            let border = !inside(px - 1, py)
                || !inside(px + 1, py)
                || !inside(px, py - 1)
                || !inside(px, py + 1);
            if border {
                pixels[py as usize * width as usize + px as usize] = index;
            }
        }
    }
    Sprite::new(width, height, x_offset, y_offset, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_tile_covers_its_diamond() {
        let s = surface_sprite(64, Slope::FLAT, |shade| 10 + shade);
        // North corner of the base level sits at (-x_offset, -y_offset) in the image.
        let (ax, ay) = (-s.x_offset, -s.y_offset);
        assert_ne!(s.get_pixel(ax, ay), 0);
        // Centre of the diamond.
        assert_eq!(s.get_pixel(ax, ay + 16), 11);
        // Far corners.
        assert_ne!(s.get_pixel(ax + 32, ay + 16), 0);
        assert_ne!(s.get_pixel(ax - 32, ay + 16), 0);
        assert_ne!(s.get_pixel(ax, ay + 32), 0);
        // Above the north corner and outside the diamond.
        assert_eq!(s.get_pixel(ax, ay - 1), 0);
        assert_eq!(s.get_pixel(ax + 30, ay + 2), 0);
    }

    #[test]
    fn raised_north_corner_moves_up() {
        let s = surface_sprite(64, Slope(Slope::NORTH), |_| 5);
        let (ax, ay) = (-s.x_offset, -s.y_offset);
        assert_ne!(s.get_pixel(ax, ay - 16), 0);
        assert_eq!(s.get_pixel(ax, ay - 17), 0);
    }

    #[test]
    fn steep_tile_fits_the_frame() {
        for top in [Slope::NORTH, Slope::EAST, Slope::SOUTH, Slope::WEST] {
            let s = surface_sprite(32, Slope(Slope::STEEP | top), |_| 7);
            assert!(s.opaque_count() > 0);
        }
        let s = surface_sprite(32, Slope(Slope::STEEP | Slope::NORTH), |_| 7);
        // Top corner two levels up lands on the first image row.
        assert_eq!(s.get_pixel(-s.x_offset, 0), 7);
    }

    #[test]
    fn cursor_is_an_outline() {
        let c = cursor_sprite(64, Slope::FLAT, 1);
        let s = surface_sprite(64, Slope::FLAT, |_| 9);
        let (ax, ay) = (-c.x_offset, -c.y_offset);
        assert_eq!(c.get_pixel(ax, ay), 1);
        assert_eq!(c.get_pixel(ax, ay + 16), 0);
        assert!(c.opaque_count() < s.opaque_count());
        for (a, b) in c.pixels().iter().zip(s.pixels()) {
            if *a != 0 {
                assert_ne!(*b, 0);
            }
        }
    }

    #[test]
    fn sloped_halves_shade_differently() {
        assert_eq!(half_shades(Slope::FLAT), (1, 1));
        let (west, east) = half_shades(Slope(Slope::EAST));
        assert!(east < west);
    }
}
