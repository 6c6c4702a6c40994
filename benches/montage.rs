use criterion::{criterion_group, criterion_main, Criterion};
use montage::{find_closest, Color, OwnedImage, Palette, PlanConfig, Planner};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn make_target(width: usize, height: usize) -> OwnedImage {
    OwnedImage::from_fn(width, height, |x, y| {
        Color::new(
            ((x * 13) ^ (y * 7)) as u8,
            ((x * y) & 0xFF) as u8,
            ((x + y) & 0xFF) as u8,
        )
    })
    .unwrap()
}

fn make_palette(size: usize, seed: u64) -> Palette {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|i| {
            let color = Color::new(rng.random(), rng.random(), rng.random());
            (format!("donor-{i:05}"), color)
        })
        .collect()
}

fn bench_find_closest(c: &mut Criterion) {
    let palette = make_palette(4096, 1);
    let mut rng = StdRng::seed_from_u64(2);
    let query = Color::new(90, 140, 30);

    c.bench_function("find_closest_4096", |b| {
        b.iter(|| black_box(find_closest(query, &palette, 5.0, &mut rng).unwrap().distance));
    });
}

fn bench_build_plan(c: &mut Criterion) {
    let target = make_target(256, 192);
    let palette = make_palette(1024, 3);
    let cfg = PlanConfig {
        upscale: 4,
        tile_width: 16,
        tile_height: 12,
        tolerance: 5.0,
        seed: Some(7),
        parallel: false,
    };

    let sequential = Planner::new(cfg.clone());
    c.bench_function("build_plan_sequential", |b| {
        b.iter(|| black_box(sequential.build_plan(target.view(), &palette).unwrap()));
    });

    if cfg!(feature = "rayon") {
        let parallel = Planner::new(PlanConfig {
            parallel: true,
            ..cfg
        });
        c.bench_function("build_plan_parallel", |b| {
            b.iter(|| black_box(parallel.build_plan(target.view(), &palette).unwrap()));
        });
    }
}

criterion_group!(benches, bench_find_closest, bench_build_plan);
criterion_main!(benches);
