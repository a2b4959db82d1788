use isovox_geom::ViewOrientation;
use isovox_sprites::{PixelClass, SpriteProvider, SpriteStore};
use isovox_world::{GroundType, Slope};
use proptest::prelude::*;

fn store() -> SpriteStore {
    SpriteStore::from_toml_str(
        r#"
        tile_widths = [16, 32]
        cursor = [250, 250, 10]
        [grounds]
        sand = [200, 180, 100]
    "#,
    )
    .unwrap()
}

fn slope() -> impl Strategy<Value = Slope> {
    prop::sample::select(Slope::all().collect::<Vec<_>>())
}

fn orient() -> impl Strategy<Value = ViewOrientation> {
    prop::sample::select(ViewOrientation::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Every valid combination has a sprite; the cursor never draws outside its tile.
    #[test]
    fn cursor_within_surface(s in slope(), o in orient(), w in prop::sample::select(vec![16u16, 32])) {
        let store = store();
        let surface = store.surface_sprite(GroundType::Grass, s, w, o).unwrap();
        let cursor = store.cursor_sprite(s, w, o).unwrap();
        prop_assert_eq!((surface.width, surface.height), (cursor.width, cursor.height));
        prop_assert_eq!(surface.origin(), cursor.origin());
        prop_assert!(cursor.opaque_count() > 0);
        for (c, p) in cursor.pixels().iter().zip(surface.pixels()) {
            if *c != 0 {
                prop_assert_ne!(*p, 0);
                prop_assert_eq!(store.palette().classify(*c), PixelClass::Cursor);
            }
        }
    }

    // Four quarter turns of the view bring back the same image.
    #[test]
    fn full_turn_same_image(s in slope()) {
        let store = store();
        let north = store.surface_sprite(GroundType::Dry, s, 32, ViewOrientation::North).unwrap();
        let mut o = ViewOrientation::North;
        for _ in 0..4 {
            o = o.rotate(1);
        }
        let again = store.surface_sprite(GroundType::Dry, s, 32, o).unwrap();
        prop_assert_eq!(north, again);
    }
}
