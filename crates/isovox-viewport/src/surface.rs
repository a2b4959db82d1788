//! Presentation surfaces the viewport composites into.

use core::ops::{Deref, DerefMut};

use isovox_geom::{Point, Rect};
use isovox_sprites::{Palette, Sprite};

/// Target of the draw cycle. Drawing happens only between `lock` and `unlock`;
/// use [`SurfaceGuard`] to pair them.
pub trait Surface {
    fn lock(&mut self);
    fn unlock(&mut self);
    /// Set every pixel to `color` (`0xAARRGGBB`).
    fn fill(&mut self, color: u32);
    /// Draw the opaque pixels of `sprite` with its top-left corner at `base`,
    /// touching nothing outside `clip`.
    fn blit(&mut self, base: Point, sprite: &Sprite, clip: Rect);
}

/// Keeps a surface locked for its lifetime.
pub struct SurfaceGuard<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: Surface + ?Sized> SurfaceGuard<'s, S> {
    pub fn new(surface: &'s mut S) -> Self {
        surface.lock();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for SurfaceGuard<'_, S> {
    type Target = S;
    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for SurfaceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.unlock();
    }
}

/// 32-bit framebuffer that resolves sprite palette indices on blit.
///
/// Row-major `0xAARRGGBB` pixels, `width * height` of them.
pub struct SoftwareSurface {
    width: i32,
    height: i32,
    color: Vec<u32>,
    palette: Palette,
    locked: bool,
}

impl SoftwareSurface {
    pub fn new(width: i32, height: i32, palette: Palette) -> Self {
        assert!(width >= 0 && height >= 0, "negative surface size {width}x{height}");
        Self {
            width,
            height,
            color: vec![0; width as usize * height as usize],
            palette,
            locked: false,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.color
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if !self.bounds().contains(Point::new(x, y)) {
            return None;
        }
        Some(self.color[(y * self.width + x) as usize])
    }

    /// Reallocate for a new window size; contents are cleared.
    pub fn resize(&mut self, width: i32, height: i32) {
        assert!(!self.locked, "resizing a locked surface");
        self.width = width.max(0);
        self.height = height.max(0);
        self.color = vec![0; self.width as usize * self.height as usize];
    }

    /// Pixels as `R, G, B, A` bytes, the layout GPU textures expect.
    pub fn write_rgba(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.color.len() * 4);
        for c in &self.color {
            out.extend_from_slice(&[(c >> 16) as u8, (c >> 8) as u8, *c as u8, (c >> 24) as u8]);
        }
    }
}

impl Surface for SoftwareSurface {
    fn lock(&mut self) {
        assert!(!self.locked, "surface locked twice");
        self.locked = true;
    }

    fn unlock(&mut self) {
        assert!(self.locked, "unlocking a surface that is not locked");
        self.locked = false;
    }

    fn fill(&mut self, color: u32) {
        assert!(self.locked, "fill on an unlocked surface");
        self.color.fill(color);
    }

    fn blit(&mut self, base: Point, sprite: &Sprite, clip: Rect) {
        assert!(self.locked, "blit on an unlocked surface");
        let image = Rect::new(base.x, base.y, sprite.width as i32, sprite.height as i32);
        let Some(area) = self
            .bounds()
            .intersect(&clip)
            .and_then(|r| r.intersect(&image))
        else {
            return;
        };
        for y in area.y..area.bottom() {
            let src = sprite.row((y - base.y) as usize);
            let row = (y * self.width) as usize;
            for x in area.x..area.right() {
                let idx = src[(x - base.x) as usize];
                if idx != 0 {
                    self.color[row + x as usize] = self.palette.color(idx);
                }
            }
        }
    }
}
