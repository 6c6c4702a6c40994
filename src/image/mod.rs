//! RGB image views and owned buffers.
//!
//! `ImageView` is a borrowed 2D view into a packed RGB byte buffer with an
//! explicit stride. The stride counts pixels between the starts of
//! consecutive rows, so a stride larger than the width represents padded
//! rows. ROI slices are zero-copy views into the same backing slice and
//! retain the original stride.

use crate::color::Color;
use crate::util::{MontageError, MontageResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Bytes per packed RGB pixel.
pub const CHANNELS: usize = 3;

/// Borrowed packed-RGB image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> MontageResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride (in pixels).
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> MontageResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(MontageError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in pixels between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y
            .checked_mul(self.stride)?
            .checked_add(x)?
            .checked_mul(CHANNELS)?;
        let px = self.data.get(start..start + CHANNELS)?;
        Some(Color::new(px[0], px[1], px[2]))
    }

    /// Returns the packed RGB bytes of row `y` (`width * 3` bytes).
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?.checked_mul(CHANNELS)?;
        let end = start.checked_add(self.width * CHANNELS)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(&self, x: usize, y: usize, width: usize, height: usize) -> MontageResult<Self> {
        if width == 0 || height == 0 {
            return Err(MontageError::InvalidDimensions { width, height });
        }

        let out_of_bounds = MontageError::RegionOutOfBounds {
            x0: x,
            y0: y,
            x1: x.saturating_add(width),
            y1: y.saturating_add(height),
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or(MontageError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self.data.get(start..).ok_or(MontageError::BufferTooSmall {
            needed: start.saturating_add(CHANNELS),
            got: self.data.len(),
        })?;

        ImageView::new(data, width, height, self.stride)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> MontageResult<usize> {
    if width == 0 || height == 0 {
        return Err(MontageError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(MontageError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or(MontageError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Owned contiguous packed-RGB image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a packed RGB buffer of exactly `width * height * 3` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> MontageResult<Self> {
        if width == 0 || height == 0 {
            return Err(MontageError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or(MontageError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(MontageError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(MontageError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image filled with a single color.
    pub fn filled(width: usize, height: usize, color: Color) -> MontageResult<Self> {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Creates an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> MontageResult<Self>
    where
        F: FnMut(usize, usize) -> Color,
    {
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or(MontageError::InvalidDimensions { width, height })?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_array());
            }
        }
        Self::new(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the packed RGB bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}
