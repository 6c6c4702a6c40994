//! Flat-color preview of sampled tiles.

use crate::color::Color;
use crate::grid::TileBounds;
use crate::image::{OwnedImage, CHANNELS};
use crate::util::{MontageError, MontageResult};

/// Paints each tile's color as a filled rectangle on a black canvas.
///
/// Tiles reaching past the canvas are clipped.
pub fn render_pixelated<I>(width: usize, height: usize, tiles: I) -> MontageResult<OwnedImage>
where
    I: IntoIterator<Item = (TileBounds, Color)>,
{
    if width == 0 || height == 0 {
        return Err(MontageError::InvalidDimensions { width, height });
    }
    let len = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or(MontageError::InvalidDimensions { width, height })?;
    let mut data = vec![0u8; len];

    for (bounds, color) in tiles {
        let x1 = bounds.x1.min(width);
        let y1 = bounds.y1.min(height);
        if bounds.x0 >= x1 || bounds.y0 >= y1 {
            continue;
        }
        let rgb = color.to_array();
        for y in bounds.y0..y1 {
            let start = (y * width + bounds.x0) * CHANNELS;
            let end = (y * width + x1) * CHANNELS;
            for px in data[start..end].chunks_exact_mut(CHANNELS) {
                px.copy_from_slice(&rgb);
            }
        }
    }

    OwnedImage::new(data, width, height)
}
