//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{MontageError, MontageResult};
use std::path::Path;

/// Creates a borrowed view from an RGB image buffer.
pub fn view_from_rgb_image(img: &image::RgbImage) -> MontageResult<ImageView<'_>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Creates an owned image from an RGB image buffer.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> MontageResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::new(img.as_raw().clone(), width, height)
}

/// Converts an owned image back into an `image::RgbImage`.
pub fn rgb_image_from_owned(img: &OwnedImage) -> MontageResult<image::RgbImage> {
    let width = to_u32(img.width())?;
    let height = to_u32(img.height())?;
    image::RgbImage::from_raw(width, height, img.data().to_vec()).ok_or(
        MontageError::BufferTooSmall {
            needed: img.width() * img.height() * 3,
            got: img.data().len(),
        },
    )
}

/// Loads an image from disk and converts it to 8-bit RGB.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> MontageResult<image::RgbImage> {
    let img = image::open(path).map_err(|err| MontageError::ImageIo {
        reason: err.to_string(),
    })?;
    Ok(img.to_rgb8())
}

/// Loads an image from disk as an owned RGB buffer.
pub fn load_owned_image<P: AsRef<Path>>(path: P) -> MontageResult<OwnedImage> {
    owned_from_rgb_image(&load_rgb_image(path)?)
}

/// Saves an RGB image, inferring the format from the path extension.
pub fn save_rgb_image<P: AsRef<Path>>(img: &image::RgbImage, path: P) -> MontageResult<()> {
    img.save(path).map_err(|err| MontageError::ImageIo {
        reason: err.to_string(),
    })
}

pub(crate) fn to_u32(value: usize) -> MontageResult<u32> {
    u32::try_from(value).map_err(|_| MontageError::ImageIo {
        reason: format!("dimension {value} exceeds u32"),
    })
}
