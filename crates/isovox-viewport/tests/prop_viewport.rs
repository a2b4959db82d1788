use isovox_geom::{Rect, ViewOrientation};
use isovox_sprites::SpriteStore;
use isovox_viewport::{RenderContext, Viewport, ViewportParams};
use isovox_world::{GroundType, VoxelWorld};
use proptest::prelude::*;

fn orientation() -> impl Strategy<Value = ViewOrientation> {
    (0u8..4).prop_map(ViewOrientation::from_index)
}

fn viewport(world: &VoxelWorld, tile_width: u16, orient: ViewOrientation) -> Viewport {
    let params = ViewportParams {
        tile_width,
        zoom_levels: vec![tile_width],
        orientation: orient,
        z: 0,
        ..ViewportParams::default()
    };
    Viewport::new(Rect::new(0, 0, 640, 480), &params, world)
}

proptest! {
    // Panning back by the same screen delta returns to the start when nothing was clamped.
    #[test]
    fn pan_then_inverse(
        o in orientation(),
        tw in prop::sample::select(vec![16u16, 32, 64, 128]),
        dx in -200i32..200,
        dy in -200i32..200,
    ) {
        let world = VoxelWorld::new(256, 256);
        let mut vp = viewport(&world, tw, o);
        let start = vp.center();
        vp.move_viewport(dx, dy, &world);
        vp.move_viewport(-dx, -dy, &world);
        prop_assert_eq!(vp.center(), start);
    }

    // However far the pan, the center stays over the world; a pan with no effect does not redraw.
    #[test]
    fn pans_stay_inside(
        o in orientation(),
        moves in prop::collection::vec((-5000i32..5000, -5000i32..5000), 1..12),
    ) {
        let world = VoxelWorld::new(20, 12);
        let mut vp = viewport(&world, 64, o);
        for (dx, dy) in moves {
            let before = vp.center();
            vp.take_dirty();
            vp.move_viewport(dx, dy, &world);
            let c = vp.center();
            prop_assert!((0..=20 * 256).contains(&c.x));
            prop_assert!((0..=12 * 256).contains(&c.y));
            prop_assert_eq!(vp.is_dirty(), c != before);
        }
    }

    // Rotating four times either way ends where it started.
    #[test]
    fn four_rotations_identity(o in orientation(), clockwise in any::<bool>()) {
        let world = VoxelWorld::flat(4, 4, 0, GroundType::Grass);
        let sprites = SpriteStore::from_toml_str("tile_widths = [32]").unwrap();
        let ctx = RenderContext::new(&world, &sprites);
        let mut vp = viewport(&world, 32, o);
        for _ in 0..4 {
            vp.rotate(if clockwise { 1 } else { -1 }, ctx);
        }
        prop_assert_eq!(vp.orientation(), o);
    }
}
