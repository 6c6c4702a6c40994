//! Mean-color sampling of image regions.
//!
//! The grid lives in output space (target dimensions times the upscale
//! factor) while colors come from the unscaled target. `to_native` maps an
//! output tile to native pixels with `floor` on the leading edge and `ceil`
//! on the trailing edge, so neighbouring native regions may overlap by one
//! pixel when the upscale factor does not divide the tile size.

use crate::color::Color;
use crate::grid::TileBounds;
use crate::image::{ImageView, CHANNELS};
use crate::util::math::{div_ceil, div_floor};
use crate::util::{MontageError, MontageResult};

/// Half-open region `[x0, x1) x [y0, y1)` in native image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeRegion {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl NativeRegion {
    /// Returns true if the region holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

/// Maps output-space tile bounds to native image coordinates.
pub fn to_native(bounds: TileBounds, upscale: usize) -> MontageResult<NativeRegion> {
    if upscale == 0 {
        return Err(MontageError::InvalidUpscale { upscale });
    }
    Ok(NativeRegion {
        x0: div_floor(bounds.x0, upscale),
        y0: div_floor(bounds.y0, upscale),
        x1: div_ceil(bounds.x1, upscale),
        y1: div_ceil(bounds.y1, upscale),
    })
}

/// Integer-truncated mean color of `region` in `image`.
pub fn average_color(image: ImageView<'_>, region: NativeRegion) -> MontageResult<Color> {
    let NativeRegion { x0, y0, x1, y1 } = region;
    if region.is_empty() {
        return Err(MontageError::EmptyRegion { x0, y0, x1, y1 });
    }
    if x1 > image.width() || y1 > image.height() {
        return Err(MontageError::RegionOutOfBounds {
            x0,
            y0,
            x1,
            y1,
            img_width: image.width(),
            img_height: image.height(),
        });
    }

    let roi = image.roi(x0, y0, x1 - x0, y1 - y0)?;
    mean_of(roi)
}

/// Integer-truncated mean color of every pixel in `image`.
pub fn average_color_full(image: ImageView<'_>) -> MontageResult<Color> {
    mean_of(image)
}

fn mean_of(image: ImageView<'_>) -> MontageResult<Color> {
    let mut sums = [0u64; CHANNELS];
    for y in 0..image.height() {
        let row = image.row(y).ok_or(MontageError::BufferTooSmall {
            needed: (y + 1) * image.stride() * CHANNELS,
            got: image.as_slice().len(),
        })?;
        for px in row.chunks_exact(CHANNELS) {
            sums[0] += u64::from(px[0]);
            sums[1] += u64::from(px[1]);
            sums[2] += u64::from(px[2]);
        }
    }

    let count = (image.width() * image.height()) as u64;
    if count == 0 {
        return Err(MontageError::EmptyRegion {
            x0: 0,
            y0: 0,
            x1: image.width(),
            y1: image.height(),
        });
    }
    Ok(Color::new(
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ))
}
