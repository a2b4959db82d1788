use criterion::{Criterion, black_box, criterion_group, criterion_main};

use isovox_geom::{Projector, ViewOrientation};
use isovox_render::{PixelFinder, SpriteCollector, ViewCenter};
use isovox_sprites::SpriteStore;
use isovox_world::{VoxelWorld, WorldGenParams, generate_world};

fn make_world(size: u16) -> VoxelWorld {
    generate_world(&WorldGenParams {
        x_size: size,
        y_size: size,
        seed: 0xC0FFEE,
        ..WorldGenParams::default()
    })
}

fn bench_sprite_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("sprite_collect");
    let sprites = SpriteStore::from_toml_str("tile_widths = [64]").unwrap();
    for size in [64u16, 128] {
        let world = make_world(size);
        let center = ViewCenter::new(size as i32 * 128, size as i32 * 128, 8 * 256);
        group.bench_function(format!("world_{size}_window_1280x720"), |b| {
            b.iter(|| {
                let mut collector = SpriteCollector::new(
                    &world,
                    &sprites,
                    center,
                    Projector::with_tile_width(64, ViewOrientation::North),
                );
                collector.set_window_size(-640, -360, 1280, 720);
                black_box(collector.collect().len());
            })
        });
    }
    group.finish();
}

fn bench_pixel_finder(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel_finder");
    let sprites = SpriteStore::from_toml_str("tile_widths = [64]").unwrap();
    let world = make_world(128);
    let center = ViewCenter::new(128 * 128, 128 * 128, 8 * 256);
    for orient in [ViewOrientation::North, ViewOrientation::South] {
        group.bench_function(format!("world_128_{orient:?}"), |b| {
            b.iter(|| {
                let projector = Projector::with_tile_width(64, orient);
                let mut finder = PixelFinder::new(&world, &sprites, center, projector);
                finder.set_window_size(17, -23, 1, 1);
                black_box(finder.find());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sprite_collect, bench_pixel_finder);
criterion_main!(benches);
