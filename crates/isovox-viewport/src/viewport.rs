use isovox_geom::{Point, Projector, Rect, VOXEL_UNITS, ViewOrientation, VoxelCoord};
use isovox_render::{CollectStats, PickResult, PixelFinder, SpriteCollector, ViewCenter};
use isovox_sprites::SpriteProvider;
use isovox_world::WorldAccess;

use crate::config::ViewportParams;
use crate::mouse::{MouseButtons, MouseMode};
use crate::surface::{Surface, SurfaceGuard};

/// World and images borrowed for one viewport operation.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub world: &'a dyn WorldAccess,
    pub sprites: &'a dyn SpriteProvider,
}

impl<'a> RenderContext<'a> {
    pub fn new(world: &'a dyn WorldAccess, sprites: &'a dyn SpriteProvider) -> Self {
        Self { world, sprites }
    }
}

/// What one [`Viewport::on_draw`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub commands: usize,
    pub cursors: usize,
    pub collect: CollectStats,
}

/// Window onto the world: view position, orientation, zoom and pointer state.
#[derive(Clone, Debug)]
pub struct Viewport {
    /// Position and size of the window on the display.
    rect: Rect,
    center: ViewCenter,
    tile_width: u16,
    tile_height: u16,
    orientation: ViewOrientation,
    zoom_levels: Vec<u16>,
    background: u32,

    mouse_mode: MouseMode,
    /// Last pointer position, relative to the window.
    mouse_pos: Point,
    mouse_state: MouseButtons,
    /// Voxel under the pointer, as of the last successful probe.
    cursor: VoxelCoord,
    /// Palette index of the pixel that probe hit.
    cursor_pixel: u8,
    dirty: bool,
}

impl Viewport {
    /// Viewport looking at the middle of `world`.
    pub fn new(rect: Rect, params: &ViewportParams, world: &dyn WorldAccess) -> Self {
        let mut zoom_levels = params.zoom_levels.clone();
        if !zoom_levels.contains(&params.tile_width) {
            zoom_levels.push(params.tile_width);
            zoom_levels.sort_unstable();
        }
        Self {
            rect,
            center: ViewCenter::new(
                world.x_size() as i32 * VOXEL_UNITS / 2,
                world.y_size() as i32 * VOXEL_UNITS / 2,
                params.z * VOXEL_UNITS,
            ),
            tile_width: params.tile_width,
            tile_height: params.tile_width / 4,
            orientation: params.orientation,
            zoom_levels,
            background: params.background,
            mouse_mode: params.mouse_mode,
            mouse_pos: Point::ZERO,
            mouse_state: MouseButtons::NONE,
            cursor: VoxelCoord::default(),
            cursor_pixel: 0,
            dirty: true,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Move or resize the window on the display.
    pub fn set_rect(&mut self, rect: Rect) {
        if rect != self.rect {
            self.rect = rect;
            self.mark_dirty();
        }
    }

    #[inline]
    pub fn center(&self) -> ViewCenter {
        self.center
    }

    #[inline]
    pub fn orientation(&self) -> ViewOrientation {
        self.orientation
    }

    #[inline]
    pub fn tile_width(&self) -> u16 {
        self.tile_width
    }

    #[inline]
    pub fn tile_height(&self) -> u16 {
        self.tile_height
    }

    #[inline]
    pub fn zoom_levels(&self) -> &[u16] {
        &self.zoom_levels
    }

    #[inline]
    pub fn mouse_mode(&self) -> MouseMode {
        self.mouse_mode
    }

    #[inline]
    pub fn mouse_buttons(&self) -> MouseButtons {
        self.mouse_state
    }

    #[inline]
    pub fn cursor_voxel(&self) -> VoxelCoord {
        self.cursor
    }

    /// Palette index under the pointer at the last hit; 0 before any.
    #[inline]
    pub fn cursor_pixel(&self) -> u8 {
        self.cursor_pixel
    }

    #[inline]
    pub fn projector(&self) -> Projector {
        Projector::new(
            self.tile_width as i32,
            self.tile_height as i32,
            self.orientation,
        )
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Report and clear the redraw request.
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Composite the visible world into `surface`, back to front.
    pub fn on_draw<S: Surface + ?Sized>(
        &self,
        ctx: RenderContext<'_>,
        surface: &mut S,
    ) -> FrameStats {
        let (w, h) = (self.rect.w, self.rect.h);
        let mut collector =
            SpriteCollector::new(ctx.world, ctx.sprites, self.center, self.projector());
        collector.set_window_size(-w / 2, -h / 2, w, h);
        collector.set_xy_offset(self.rect.top_left());
        if self.mouse_mode == MouseMode::TileTerraform {
            collector.set_mouse_cursor(self.cursor);
        }
        let images = collector.collect();

        let mut stats = FrameStats {
            commands: images.len(),
            cursors: 0,
            collect: images.stats,
        };
        let mut guard = SurfaceGuard::new(surface);
        guard.fill(self.background);
        for cmd in &images {
            guard.blit(cmd.base, cmd.sprite, self.rect);
            if let Some(cursor) = cmd.cursor {
                guard.blit(cmd.base, cursor, self.rect);
                stats.cursors += 1;
            }
        }
        drop(guard);
        log::trace!("drew {} images ({:?})", stats.commands, stats.collect);
        stats
    }

    /// Probe the pixel under the pointer and track the voxel drawn there.
    pub fn compute_cursor_position(&mut self, ctx: RenderContext<'_>) -> Option<PickResult> {
        let xp = self.mouse_pos.x - self.rect.w / 2;
        let yp = self.mouse_pos.y - self.rect.h / 2;
        let mut finder = PixelFinder::new(ctx.world, ctx.sprites, self.center, self.projector());
        finder.set_window_size(xp, yp, 1, 1);
        let hit = finder.find();
        if let Some(h) = hit {
            self.cursor_pixel = h.pixel;
            if h.voxel != self.cursor {
                log::debug!("cursor voxel {:?} -> {:?}", self.cursor, h.voxel);
                self.cursor = h.voxel;
                self.mark_dirty();
            }
        }
        hit
    }

    /// Turn the view a quarter; positive `direction` is clockwise.
    pub fn rotate(&mut self, direction: i32, ctx: RenderContext<'_>) {
        self.orientation = self.orientation.rotate(direction);
        log::debug!("view orientation {:?}", self.orientation);
        self.compute_cursor_position(ctx);
        self.mark_dirty();
    }

    /// Shift the view by `(dx, dy)` screen pixels, staying above the world.
    pub fn move_viewport(&mut self, dx: i32, dy: i32, world: &dyn WorldAccess) {
        let tw = self.tile_width as i32;
        let (hx, vy) = (dx * 256 / tw, dy * 512 / tw);
        let (x, y) = (self.center.x, self.center.y);
        let (new_x, new_y) = match self.orientation {
            ViewOrientation::North => (x + hx - vy, y - hx - vy),
            ViewOrientation::East => (x - hx - vy, y - hx + vy),
            ViewOrientation::South => (x - hx + vy, y + hx + vy),
            ViewOrientation::West => (x + hx + vy, y + hx - vy),
        };
        let new_x = new_x.clamp(0, world.x_size() as i32 * VOXEL_UNITS);
        let new_y = new_y.clamp(0, world.y_size() as i32 * VOXEL_UNITS);
        if new_x != x || new_y != y {
            self.center.x = new_x;
            self.center.y = new_y;
            self.mark_dirty();
        }
    }

    /// Step `steps` zoom levels (positive zooms in). Returns whether the zoom changed.
    pub fn zoom(&mut self, steps: i32, ctx: RenderContext<'_>) -> bool {
        let current = self
            .zoom_levels
            .iter()
            .position(|w| *w >= self.tile_width)
            .unwrap_or(self.zoom_levels.len().saturating_sub(1));
        let last = self.zoom_levels.len() as i32 - 1;
        let target = (current as i32 + steps).clamp(0, last.max(0)) as usize;
        let Some(&width) = self.zoom_levels.get(target) else {
            return false;
        };
        if width == self.tile_width {
            return false;
        }
        self.tile_width = width;
        self.tile_height = width / 4;
        log::debug!("tile width {}", width);
        self.compute_cursor_position(ctx);
        self.mark_dirty();
        true
    }

    pub fn set_mouse_mode(&mut self, mode: MouseMode) {
        log::debug!("mouse mode {:?}", mode);
        self.mouse_state = MouseButtons::NONE;
        self.mouse_mode = mode;
        self.mark_dirty();
    }

    /// `pos` is relative to the window.
    pub fn on_mouse_move_event(&mut self, pos: Point, ctx: RenderContext<'_>) {
        match self.mouse_mode {
            MouseMode::Inactive => {}
            MouseMode::TileTerraform => {
                if pos == self.mouse_pos {
                    return;
                }
                if self.mouse_state.contains(MouseButtons::RIGHT) {
                    let delta = pos - self.mouse_pos;
                    self.move_viewport(delta.x, delta.y, ctx.world);
                    self.mouse_pos = pos;
                } else {
                    self.mouse_pos = pos;
                    self.compute_cursor_position(ctx);
                }
            }
        }
    }

    pub fn on_mouse_button_event(&mut self, state: u8) {
        match self.mouse_mode {
            MouseMode::Inactive => {}
            MouseMode::TileTerraform => self.mouse_state = MouseButtons::from_state(state),
        }
    }

    /// Positive `delta` zooms in.
    pub fn on_mouse_wheel_event(&mut self, delta: i32, ctx: RenderContext<'_>) {
        if delta != 0 {
            self.zoom(delta.signum(), ctx);
        }
    }

    pub fn on_mouse_enter_event(&mut self) {
        self.mouse_state = MouseButtons::NONE;
    }

    pub fn on_mouse_leave_event(&mut self) {
        self.mouse_state = MouseButtons::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isovox_sprites::{Sprite, SpriteStore};
    use isovox_world::{GroundType, VoxelWorld};

    fn params() -> ViewportParams {
        ViewportParams {
            tile_width: 64,
            zoom_levels: vec![32, 64, 128],
            z: 0,
            ..ViewportParams::default()
        }
    }

    fn setup() -> (VoxelWorld, SpriteStore) {
        let world = VoxelWorld::flat(8, 8, 0, GroundType::Grass);
        let sprites = SpriteStore::from_toml_str("tile_widths = [32, 64, 128]").unwrap();
        (world, sprites)
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Op {
        Lock,
        Fill(u32),
        Blit(Point, *const Sprite),
        Unlock,
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Surface for Recorder {
        fn lock(&mut self) {
            self.0.push(Op::Lock);
        }
        fn unlock(&mut self) {
            self.0.push(Op::Unlock);
        }
        fn fill(&mut self, color: u32) {
            self.0.push(Op::Fill(color));
        }
        fn blit(&mut self, base: Point, sprite: &Sprite, _clip: Rect) {
            self.0.push(Op::Blit(base, sprite as *const Sprite));
        }
    }

    #[test]
    fn starts_centered_and_dirty() {
        let (world, _) = setup();
        let vp = Viewport::new(Rect::new(0, 0, 320, 240), &params(), &world);
        assert_eq!(vp.center(), ViewCenter::new(1024, 1024, 0));
        assert_eq!((vp.tile_width(), vp.tile_height()), (64, 16));
        assert_eq!(vp.mouse_mode(), MouseMode::Inactive);
        assert!(vp.is_dirty());
    }

    #[test]
    fn draw_is_locked_filled_and_ordered() {
        let (world, sprites) = setup();
        let ctx = RenderContext::new(&world, &sprites);
        let mut vp = Viewport::new(Rect::new(0, 0, 320, 240), &params(), &world);
        vp.set_mouse_mode(MouseMode::TileTerraform);
        vp.on_mouse_move_event(Point::new(160, 128), ctx);
        assert_eq!(vp.cursor_voxel(), VoxelCoord::new(4, 4, 0));
        assert!(matches!(
            sprites.palette().classify(vp.cursor_pixel()),
            isovox_sprites::PixelClass::Ground { ground: GroundType::Grass, .. }
        ));

        let mut rec = Recorder::default();
        let stats = vp.on_draw(ctx, &mut rec);
        assert_eq!(stats.cursors, 1);
        assert_eq!(rec.0.first(), Some(&Op::Lock));
        assert_eq!(rec.0.get(1), Some(&Op::Fill(0xFF00_0000)));
        assert_eq!(rec.0.last(), Some(&Op::Unlock));
        assert_eq!(rec.0.len(), 3 + stats.commands + stats.cursors);

        let cursor: *const Sprite = sprites
            .cursor_sprite(isovox_world::Slope::FLAT, 64, ViewOrientation::North)
            .unwrap();
        let at = rec
            .0
            .iter()
            .position(|op| matches!(op, Op::Blit(_, s) if *s == cursor))
            .unwrap();
        // The overlay goes right on top of its ground sprite.
        match (&rec.0[at - 1], &rec.0[at]) {
            (Op::Blit(a, s), Op::Blit(b, _)) => {
                assert_eq!(a, b);
                assert_ne!(*s, cursor);
            }
            other => panic!("unexpected ops {other:?}"),
        }
    }

    #[test]
    fn inactive_mode_ignores_the_pointer() {
        let (world, sprites) = setup();
        let ctx = RenderContext::new(&world, &sprites);
        let mut vp = Viewport::new(Rect::new(0, 0, 320, 240), &params(), &world);
        vp.take_dirty();
        vp.on_mouse_button_event(MouseButtons::RIGHT.0);
        vp.on_mouse_move_event(Point::new(160, 128), ctx);
        assert_eq!(vp.mouse_buttons(), MouseButtons::NONE);
        assert_eq!(vp.cursor_voxel(), VoxelCoord::default());
        assert!(!vp.is_dirty());
    }

    #[test]
    fn right_drag_pans() {
        let (world, sprites) = setup();
        let ctx = RenderContext::new(&world, &sprites);
        let mut vp = Viewport::new(Rect::new(0, 0, 320, 240), &params(), &world);
        vp.set_mouse_mode(MouseMode::TileTerraform);
        vp.on_mouse_move_event(Point::new(100, 100), ctx);
        vp.on_mouse_button_event(0xF0 | MouseButtons::RIGHT.0);
        assert_eq!(vp.mouse_buttons(), MouseButtons::RIGHT);
        vp.take_dirty();
        let cursor = vp.cursor_voxel();
        vp.on_mouse_move_event(Point::new(110, 100), ctx);
        assert_eq!(vp.center(), ViewCenter::new(1024 + 40, 1024 - 40, 0));
        assert_eq!(vp.cursor_voxel(), cursor);
        assert!(vp.take_dirty());
    }

    #[test]
    fn mode_change_and_leave_clear_buttons() {
        let (world, _) = setup();
        let mut vp = Viewport::new(Rect::new(0, 0, 320, 240), &params(), &world);
        vp.set_mouse_mode(MouseMode::TileTerraform);
        vp.on_mouse_button_event(MouseButtons::LEFT.0);
        vp.on_mouse_leave_event();
        assert!(vp.mouse_buttons().is_empty());
        vp.on_mouse_button_event(MouseButtons::LEFT.0);
        vp.on_mouse_enter_event();
        assert!(vp.mouse_buttons().is_empty());
        vp.on_mouse_button_event(MouseButtons::MIDDLE.0);
        vp.set_mouse_mode(MouseMode::TileTerraform);
        assert!(vp.mouse_buttons().is_empty());
    }

    #[test]
    fn clamped_pan_is_not_dirty() {
        let (world, _) = setup();
        let mut vp = Viewport::new(Rect::new(0, 0, 320, 240), &params(), &world);
        vp.move_viewport(0, 10_000, &world);
        assert_eq!((vp.center().x, vp.center().y), (0, 0));
        assert!(vp.take_dirty());
        vp.move_viewport(0, 500, &world);
        assert_eq!((vp.center().x, vp.center().y), (0, 0));
        assert!(!vp.is_dirty());
    }

    #[test]
    fn rotation_always_redraws() {
        let (world, sprites) = setup();
        let ctx = RenderContext::new(&world, &sprites);
        let mut vp = Viewport::new(Rect::new(0, 0, 320, 240), &params(), &world);
        for _ in 0..4 {
            vp.take_dirty();
            vp.rotate(-1, ctx);
            assert!(vp.is_dirty());
        }
        assert_eq!(vp.orientation(), ViewOrientation::North);
        vp.rotate(1, ctx);
        assert_eq!(vp.orientation(), ViewOrientation::East);
    }

    #[test]
    fn wheel_steps_through_zoom_levels() {
        let (world, sprites) = setup();
        let ctx = RenderContext::new(&world, &sprites);
        let mut vp = Viewport::new(Rect::new(0, 0, 320, 240), &params(), &world);
        vp.take_dirty();
        vp.on_mouse_wheel_event(3, ctx);
        assert_eq!((vp.tile_width(), vp.tile_height()), (128, 32));
        assert!(vp.take_dirty());
        assert!(!vp.zoom(1, ctx));
        assert!(!vp.is_dirty());
        vp.on_mouse_wheel_event(-1, ctx);
        vp.on_mouse_wheel_event(-1, ctx);
        assert_eq!(vp.tile_width(), 32);
        assert!(!vp.zoom(-1, ctx));
    }
}
