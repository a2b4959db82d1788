use isovox_geom::{Point, ViewOrientation};
use isovox_world::{GroundType, Slope};

/// Palette-indexed image. Pixel value 0 is fully transparent.
///
/// The origin offset is where the image's top-left corner lies relative to the
/// north corner of the voxel it is drawn for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub width: u16,
    pub height: u16,
    pub x_offset: i32,
    pub y_offset: i32,
    pixels: Vec<u8>,
}

impl Sprite {
    pub fn new(width: u16, height: u16, x_offset: i32, y_offset: i32, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "sprite pixel buffer does not match {width}x{height}"
        );
        Self {
            width,
            height,
            x_offset,
            y_offset,
            pixels,
        }
    }

    /// Image with every pixel set to `value`.
    pub fn filled(width: u16, height: u16, x_offset: i32, y_offset: i32, value: u8) -> Self {
        Self::new(
            width,
            height,
            x_offset,
            y_offset,
            vec![value; width as usize * height as usize],
        )
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x_offset, self.y_offset)
    }

    /// Pixel at `(x, y)` in image coordinates; 0 outside the image.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let w = self.width as usize;
        &self.pixels[y * w..(y + 1) * w]
    }

    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p != 0).count()
    }
}

/// Source of the images drawn for voxels.
pub trait SpriteProvider {
    /// Image of a surface tile, `None` when nothing is available for the combination.
    fn surface_sprite(
        &self,
        ground: GroundType,
        slope: Slope,
        tile_width: u16,
        orient: ViewOrientation,
    ) -> Option<&Sprite>;

    /// Cursor overlay for a tile with the given slope.
    fn cursor_sprite(&self, slope: Slope, tile_width: u16, orient: ViewOrientation)
    -> Option<&Sprite>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_outside_are_transparent() {
        let s = Sprite::new(2, 2, -1, 0, vec![1, 2, 3, 4]);
        assert_eq!(s.get_pixel(0, 0), 1);
        assert_eq!(s.get_pixel(1, 1), 4);
        assert_eq!(s.get_pixel(2, 0), 0);
        assert_eq!(s.get_pixel(0, 2), 0);
        assert_eq!(s.get_pixel(-1, 0), 0);
        assert_eq!(s.row(1), &[3, 4]);
        assert_eq!(s.origin(), Point::new(-1, 0));
    }

    #[test]
    #[should_panic]
    fn mismatched_buffer_panics() {
        let _ = Sprite::new(3, 3, 0, 0, vec![0; 8]);
    }
}
