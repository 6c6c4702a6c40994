#![cfg(feature = "image-io")]

use image::{Rgb, RgbImage};
use montage::compose::{compose, load_from_disk, resize_donor, ResizeMode};
use montage::io::{owned_from_rgb_image, rgb_image_from_owned, view_from_rgb_image};
use montage::{Color, MontageError, Palette, PlacementPlan, PlanConfig, Planner, Point};
use std::collections::HashMap;

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

#[test]
fn rgb_image_round_trips_through_owned_buffer() {
    let mut img = solid(3, 2, [1, 2, 3]);
    img.put_pixel(2, 1, Rgb([9, 8, 7]));
    let owned = owned_from_rgb_image(&img).unwrap();
    assert_eq!(owned.view().pixel(2, 1), Some(Color::new(9, 8, 7)));
    assert_eq!(rgb_image_from_owned(&owned).unwrap(), img);
}

#[test]
fn compose_draws_each_donor_at_its_anchors() {
    let mut plan = PlacementPlan::new(10, 6, 4, 4);
    plan.push("red", Point { x: 0, y: 0 });
    plan.push("red", Point { x: 8, y: 4 });
    plan.push("blue", Point { x: 4, y: 0 });

    let donors: HashMap<&str, RgbImage> = [
        ("red", solid(2, 2, [255, 0, 0])),
        ("blue", solid(5, 3, [0, 0, 255])),
    ]
    .into_iter()
    .collect();

    let mut loads = Vec::new();
    let canvas = compose(&plan, ResizeMode::Stretch, |id| {
        loads.push(id.to_owned());
        donors
            .get(id)
            .cloned()
            .ok_or(MontageError::MissingDonor {
                id: id.to_owned(),
                reason: "not in fixture set".to_owned(),
            })
    })
    .unwrap();

    loads.sort();
    assert_eq!(loads, vec!["blue", "red"]);
    assert_eq!(canvas.dimensions(), (10, 6));
    assert_eq!(canvas.get_pixel(0, 0), &Rgb([255, 0, 0]));
    assert_eq!(canvas.get_pixel(3, 3), &Rgb([255, 0, 0]));
    assert_eq!(canvas.get_pixel(5, 2), &Rgb([0, 0, 255]));
    // Edge donor is clipped at the canvas boundary.
    assert_eq!(canvas.get_pixel(9, 5), &Rgb([255, 0, 0]));
    assert_eq!(canvas.get_pixel(0, 5), &Rgb([0, 0, 0]));
}

#[test]
fn compose_reports_missing_donor() {
    let mut plan = PlacementPlan::new(4, 4, 4, 4);
    plan.push("gone", Point { x: 0, y: 0 });
    let err = compose(&plan, ResizeMode::Cover, |id| {
        Err(MontageError::MissingDonor {
            id: id.to_owned(),
            reason: "deleted".to_owned(),
        })
    })
    .err()
    .unwrap();
    assert_eq!(
        err,
        MontageError::MissingDonor {
            id: "gone".to_owned(),
            reason: "deleted".to_owned(),
        }
    );
}

#[test]
fn resize_modes_fill_tile_size() {
    let donor = solid(30, 10, [5, 6, 7]);
    let stretched = resize_donor(donor.clone(), 8, 12, ResizeMode::Stretch);
    assert_eq!(stretched.dimensions(), (8, 12));
    let covered = resize_donor(donor, 8, 12, ResizeMode::Cover);
    assert_eq!(covered.dimensions(), (8, 12));
    assert_eq!(covered.get_pixel(4, 6), &Rgb([5, 6, 7]));
}

#[test]
fn planned_mosaic_composes_from_image_buffers() {
    let mut target = solid(4, 2, [0, 0, 0]);
    for y in 0..2 {
        for x in 2..4 {
            target.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    let palette: Palette = [
        ("dark", Color::new(10, 10, 10)),
        ("light", Color::new(240, 240, 240)),
    ]
    .into_iter()
    .collect();
    let plan = Planner::new(PlanConfig {
        upscale: 2,
        tile_width: 4,
        tile_height: 4,
        seed: Some(1),
        ..PlanConfig::default()
    })
    .build_plan(view_from_rgb_image(&target).unwrap(), &palette)
    .unwrap();

    let canvas = compose(&plan, ResizeMode::Stretch, |id| {
        Ok(match id {
            "dark" => solid(1, 1, [10, 10, 10]),
            _ => solid(1, 1, [240, 240, 240]),
        })
    })
    .unwrap();
    assert_eq!(canvas.dimensions(), (8, 4));
    assert_eq!(canvas.get_pixel(1, 1), &Rgb([10, 10, 10]));
    assert_eq!(canvas.get_pixel(6, 2), &Rgb([240, 240, 240]));
}

#[test]
fn disk_loader_keeps_decode_reason() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-an-image.png");
    std::fs::write(&path, b"plain text, not a png").unwrap();
    let id = path.to_str().unwrap();

    let err = load_from_disk(id).err().unwrap();
    match err {
        MontageError::MissingDonor { id: got, reason } => {
            assert_eq!(got, id);
            assert!(reason.to_lowercase().contains("png"), "reason was {reason:?}");
        }
        other => panic!("unexpected error {other:?}"),
    }

    let missing = dir.path().join("absent.png");
    let err = load_from_disk(missing.to_str().unwrap()).err().unwrap();
    assert!(matches!(err, MontageError::MissingDonor { ref reason, .. } if !reason.is_empty()));
}
