//! Donor compositing via the `image` crate.

use crate::image::io::{load_rgb_image, to_u32};
use crate::plan::PlacementPlan;
use crate::trace::{trace_event, trace_span};
use crate::util::{MontageError, MontageResult};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

/// How donors are fitted to the tile size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizeMode {
    /// Resize to exactly the tile size, ignoring aspect ratio.
    #[default]
    Stretch,
    /// Scale to cover the tile, then crop the overflow around the center.
    Cover,
}

/// Fits a donor image to `width x height`.
pub fn resize_donor(donor: RgbImage, width: u32, height: u32, mode: ResizeMode) -> RgbImage {
    if donor.width() == width && donor.height() == height {
        return donor;
    }
    match mode {
        ResizeMode::Stretch => imageops::resize(&donor, width, height, FilterType::Triangle),
        ResizeMode::Cover => DynamicImage::ImageRgb8(donor)
            .resize_to_fill(width, height, FilterType::Triangle)
            .to_rgb8(),
    }
}

/// Loads a donor treating its identifier as a file path.
pub fn load_from_disk(id: &str) -> MontageResult<RgbImage> {
    load_rgb_image(id).map_err(|err| MontageError::MissingDonor {
        id: id.to_owned(),
        reason: match err {
            MontageError::ImageIo { reason } => reason,
            other => other.to_string(),
        },
    })
}

/// Draws every donor of `plan` at its anchors on a fresh canvas.
///
/// `load` is called once per donor; the resized donor is reused for all of
/// its anchors. Donors on the right and bottom edges are clipped to the
/// canvas.
pub fn compose<F>(plan: &PlacementPlan, mode: ResizeMode, mut load: F) -> MontageResult<RgbImage>
where
    F: FnMut(&str) -> MontageResult<RgbImage>,
{
    let (canvas_width, canvas_height) = plan.canvas_size();
    let (tile_width, tile_height) = plan.tile_size();
    if canvas_width == 0 || canvas_height == 0 {
        return Err(MontageError::InvalidDimensions {
            width: canvas_width,
            height: canvas_height,
        });
    }
    if tile_width == 0 || tile_height == 0 {
        return Err(MontageError::InvalidDimensions {
            width: tile_width,
            height: tile_height,
        });
    }

    let _span = trace_span!("compose", donors = plan.donor_count()).entered();

    let mut canvas = RgbImage::new(to_u32(canvas_width)?, to_u32(canvas_height)?);
    let tile_width = to_u32(tile_width)?;
    let tile_height = to_u32(tile_height)?;
    for (id, anchors) in plan.iter() {
        let donor = resize_donor(load(id)?, tile_width, tile_height, mode);
        for anchor in anchors {
            imageops::overlay(&mut canvas, &donor, anchor.x as i64, anchor.y as i64);
        }
        trace_event!("donor_placed", id = id, anchors = anchors.len());
    }

    Ok(canvas)
}
