//! Scripted session without a window: drives the viewport like a user would
//! and renders into a software surface.

use isovox_geom::{Point, Rect, VoxelCoord};
use isovox_sprites::{PixelClass, SpriteStore};
use isovox_viewport::{
    FrameStats, MouseButtons, MouseMode, RenderContext, SoftwareSurface, Viewport, ViewportParams,
};
use isovox_world::{GroundType, VoxelWorld};

#[derive(Clone, Debug, Default)]
pub struct SessionSummary {
    pub frames: u32,
    pub redraws: u32,
    pub picks: u32,
    pub last_frame: FrameStats,
    pub cursor: VoxelCoord,
    /// Ground of the pixel the last pick hit.
    pub cursor_ground: Option<GroundType>,
    /// Pixels that differ from the background after the last redraw.
    pub covered: usize,
}

/// Step `frame` of the script; the cycle exercises every kind of input once.
fn script_step(frame: u32, vp: &mut Viewport, ctx: RenderContext<'_>, world: &VoxelWorld) -> bool {
    let r = vp.rect();
    let tw = vp.tile_width() as i32;
    let wobble = (frame as i32 % 5 - 2) * tw / 4;
    match frame % 8 {
        0 => {
            vp.on_mouse_move_event(Point::new(r.w / 2 + wobble, r.h / 2 + wobble), ctx);
            return true;
        }
        1 => vp.rotate(1, ctx),
        2 => vp.move_viewport(tw, tw / 2, world),
        3 => vp.on_mouse_wheel_event(1, ctx),
        4 => {
            // Right-drag back across the window.
            vp.on_mouse_button_event(MouseButtons::RIGHT.0);
            vp.on_mouse_move_event(Point::new(r.w / 2 - tw, r.h / 2), ctx);
            vp.on_mouse_button_event(0);
        }
        5 => vp.on_mouse_wheel_event(-1, ctx),
        6 => vp.rotate(-1, ctx),
        _ => {
            vp.on_mouse_leave_event();
            vp.on_mouse_enter_event();
        }
    }
    false
}

pub fn run_session(
    world: &VoxelWorld,
    sprites: &SpriteStore,
    params: &ViewportParams,
    size: (i32, i32),
    frames: u32,
) -> SessionSummary {
    let ctx = RenderContext::new(world, sprites);
    let mut vp = Viewport::new(Rect::new(0, 0, size.0, size.1), params, world);
    let mut surface = SoftwareSurface::new(size.0, size.1, sprites.palette().clone());
    if vp.mouse_mode() == MouseMode::Inactive {
        vp.set_mouse_mode(MouseMode::TileTerraform);
    }

    let mut summary = SessionSummary::default();
    for frame in 0..frames {
        if script_step(frame, &mut vp, ctx, world) {
            summary.picks += 1;
        }
        summary.frames += 1;
        if !vp.take_dirty() {
            continue;
        }
        let stats = vp.on_draw(ctx, &mut surface);
        summary.redraws += 1;
        summary.last_frame = stats;
        summary.covered = surface
            .pixels()
            .iter()
            .filter(|c| **c != params.background)
            .count();
        log::info!(
            "frame {frame}: {} images, {} cursor, {:?} tw={} center={:?} cursor voxel {:?}",
            stats.commands,
            stats.cursors,
            vp.orientation(),
            vp.tile_width(),
            vp.center(),
            vp.cursor_voxel()
        );
    }
    summary.cursor = vp.cursor_voxel();
    summary.cursor_ground = match sprites.palette().classify(vp.cursor_pixel()) {
        PixelClass::Ground { ground, .. } => Some(ground),
        _ => None,
    };
    summary
}
