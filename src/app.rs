//! Interactive raylib window around the viewport.

use std::error::Error;

use isovox_geom::{Point, Rect};
use isovox_sprites::{PixelClass, SpriteStore};
use isovox_viewport::{MouseButtons, RenderContext, SoftwareSurface, Viewport, ViewportParams};
use isovox_world::VoxelWorld;
use raylib::prelude::*;

fn button_state(rl: &RaylibHandle) -> u8 {
    let mut state = 0;
    if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
        state |= MouseButtons::LEFT.0;
    }
    if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_MIDDLE) {
        state |= MouseButtons::MIDDLE.0;
    }
    if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_RIGHT) {
        state |= MouseButtons::RIGHT.0;
    }
    state
}

pub fn run(
    world: &VoxelWorld,
    sprites: &SpriteStore,
    params: &ViewportParams,
    size: (i32, i32),
) -> Result<(), Box<dyn Error>> {
    let (mut rl, thread) = raylib::init()
        .size(size.0, size.1)
        .title("isovox")
        .resizable()
        .build();
    rl.set_target_fps(60);

    let ctx = RenderContext::new(world, sprites);
    let mut vp = Viewport::new(Rect::new(0, 0, size.0, size.1), params, world);
    let mut surface = SoftwareSurface::new(size.0, size.1, sprites.palette().clone());
    let blank = Image::gen_image_color(size.0, size.1, Color::BLACK);
    let mut texture = rl.load_texture_from_image(&thread, &blank)?;
    let mut rgba = Vec::new();
    let mut buttons = 0u8;
    let mut on_screen = false;

    while !rl.window_should_close() {
        if rl.is_window_resized() {
            let (w, h) = (rl.get_screen_width(), rl.get_screen_height());
            vp.set_rect(Rect::new(0, 0, w, h));
            surface.resize(w, h);
            let blank = Image::gen_image_color(w, h, Color::BLACK);
            texture = rl.load_texture_from_image(&thread, &blank)?;
            log::debug!("window resized to {w}x{h}");
        }

        let step = vp.tile_width() as i32 / 2;
        if rl.is_key_down(KeyboardKey::KEY_LEFT) {
            vp.move_viewport(-step, 0, world);
        }
        if rl.is_key_down(KeyboardKey::KEY_RIGHT) {
            vp.move_viewport(step, 0, world);
        }
        if rl.is_key_down(KeyboardKey::KEY_UP) {
            vp.move_viewport(0, -step, world);
        }
        if rl.is_key_down(KeyboardKey::KEY_DOWN) {
            vp.move_viewport(0, step, world);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_Q) {
            vp.rotate(-1, ctx);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_E) {
            vp.rotate(1, ctx);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_T) {
            vp.set_mouse_mode(vp.mouse_mode().toggled());
        }

        let inside = rl.is_cursor_on_screen();
        if inside != on_screen {
            if inside {
                vp.on_mouse_enter_event();
            } else {
                vp.on_mouse_leave_event();
            }
            on_screen = inside;
            buttons = 0;
        }
        let state = button_state(&rl);
        if state != buttons {
            vp.on_mouse_button_event(state);
            buttons = state;
        }
        let pos = rl.get_mouse_position();
        vp.on_mouse_move_event(Point::new(pos.x as i32, pos.y as i32), ctx);
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            vp.on_mouse_wheel_event(wheel.signum() as i32, ctx);
        }

        if vp.take_dirty() {
            vp.on_draw(ctx, &mut surface);
            surface.write_rgba(&mut rgba);
            texture.update_texture(&rgba)?;
        }

        let cursor = vp.cursor_voxel();
        let ground = match sprites.palette().classify(vp.cursor_pixel()) {
            PixelClass::Ground { ground, .. } => ground.name(),
            _ => "-",
        };
        let status = format!(
            "{:?}  tile {}  {:?}  cursor {},{},{} {}",
            vp.orientation(),
            vp.tile_width(),
            vp.mouse_mode(),
            cursor.x,
            cursor.y,
            cursor.z,
            ground
        );
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&texture, 0, 0, Color::WHITE);
        d.draw_text(&status, 8, 8, 16, Color::RAYWHITE);
        d.draw_fps(8, 28);
    }
    Ok(())
}
