#![cfg(feature = "rayon")]

use montage::{
    CancelToken, Color, MontageError, OwnedImage, Palette, PlanConfig, Planner, TileBounds,
};

fn make_target(width: usize, height: usize) -> OwnedImage {
    OwnedImage::from_fn(width, height, |x, y| {
        Color::new(
            ((x * 13) ^ (y * 7)) as u8,
            ((x * y) & 0xFF) as u8,
            ((x + y * 3) & 0xFF) as u8,
        )
    })
    .unwrap()
}

fn make_palette() -> Palette {
    let mut palette = Palette::new();
    for i in 0..48u32 {
        let v = (i * 37) as u8;
        palette.insert(format!("donor-{i:02}"), Color::new(v, v.wrapping_mul(3), 255 - v));
        // Duplicate colors force random tie-breaking.
        palette.insert(format!("twin-{i:02}"), Color::new(v, v.wrapping_mul(3), 255 - v));
    }
    palette
}

#[test]
fn parallel_matches_sequential_plan() {
    let target = make_target(40, 30);
    let palette = make_palette();
    let base = PlanConfig {
        upscale: 3,
        tile_width: 7,
        tile_height: 5,
        tolerance: 4.0,
        seed: Some(2024),
        parallel: false,
    };

    let mut seq_reports: Vec<(TileBounds, String)> = Vec::new();
    let sequential = Planner::new(base.clone())
        .build_plan_with(target.view(), &palette, |r| {
            seq_reports.push((r.bounds, r.id.to_owned()));
        })
        .unwrap();

    let mut par_reports: Vec<(TileBounds, String)> = Vec::new();
    let parallel = Planner::new(PlanConfig {
        parallel: true,
        ..base
    })
    .build_plan_with(target.view(), &palette, |r| {
        par_reports.push((r.bounds, r.id.to_owned()));
    })
    .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(seq_reports, par_reports);
}

#[test]
fn parallel_run_honours_cancellation() {
    let target = make_target(16, 16);
    let token = CancelToken::new();
    token.cancel();
    let err = Planner::new(PlanConfig {
        tile_width: 4,
        tile_height: 4,
        parallel: true,
        ..PlanConfig::default()
    })
    .with_cancel_token(token)
    .build_plan(target.view(), &make_palette())
    .err()
    .unwrap();
    assert!(matches!(err, MontageError::Cancelled { .. }));
}
