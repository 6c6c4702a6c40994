//! Error types for montage.

use crate::grid::TileBounds;
use std::fmt;
use thiserror::Error;

/// Result alias for montage operations.
pub type MontageResult<T> = std::result::Result<T, MontageError>;

/// Planning stage at which a tile failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Averaging the tile's native-space region.
    Sample,
    /// Searching the palette for the closest donor.
    Match,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Sample => f.write_str("sample"),
            Stage::Match => f.write_str("match"),
        }
    }
}

/// Errors that can occur while planning or composing a mosaic.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MontageError {
    /// A canvas, tile or image dimension is zero.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The upscale factor must be at least 1.
    #[error("invalid upscale factor {upscale}")]
    InvalidUpscale { upscale: usize },
    /// The color tolerance must be finite and non-negative.
    #[error("invalid color tolerance {tolerance}")]
    InvalidTolerance { tolerance: f64 },
    /// The row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is shorter than the declared geometry.
    #[error("buffer too small: needed {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A sample region reaches outside the image.
    #[error(
        "region [{x0}, {x1}) x [{y0}, {y1}) out of bounds for {img_width}x{img_height} image"
    )]
    RegionOutOfBounds {
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The resolved sample region contains no pixels.
    #[error("empty sample region [{x0}, {x1}) x [{y0}, {y1})")]
    EmptyRegion {
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    },
    /// The palette has no entries.
    #[error("palette index is empty")]
    EmptyIndex,
    /// The match scan finished without a candidate.
    #[error("match scan produced no candidates")]
    EmptyCandidateSet,
    /// A single tile failed; the plan is discarded.
    #[error("tile {index} at {bounds} failed during {stage}: {source}")]
    Tile {
        index: usize,
        bounds: TileBounds,
        stage: Stage,
        #[source]
        source: Box<MontageError>,
    },
    /// The run was cancelled between tiles.
    #[error("planning cancelled after {completed} tiles")]
    Cancelled { completed: usize },
    /// Decoding or encoding an image failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
    /// The compositor could not load a donor named in the plan.
    #[error("cannot load donor image {id}: {reason}")]
    MissingDonor { id: String, reason: String },
}

impl MontageError {
    pub(crate) fn at_tile(self, index: usize, bounds: TileBounds, stage: Stage) -> Self {
        MontageError::Tile {
            index,
            bounds,
            stage,
            source: Box::new(self),
        }
    }
}
