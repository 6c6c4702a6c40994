//! Partitioning of the output canvas into tiles.
//!
//! Tiles are enumerated column by column: `x0` is the outer loop and `y0`
//! the inner loop, so a 20x20 canvas with 10x10 tiles yields origins
//! `(0,0), (0,10), (10,0), (10,10)`. Tiles on the right and bottom edges are
//! clipped to the canvas and may be smaller than the nominal tile size.

use crate::util::{MontageError, MontageResult};
use std::fmt;

/// Half-open tile bounds `[x0, x1) x [y0, y1)` in output-canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileBounds {
    /// Left edge (inclusive).
    pub x0: usize,
    /// Top edge (inclusive).
    pub y0: usize,
    /// Right edge (exclusive).
    pub x1: usize,
    /// Bottom edge (exclusive).
    pub y1: usize,
}

impl TileBounds {
    /// Returns the tile width in pixels.
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    /// Returns the tile height in pixels.
    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    /// Returns the number of pixels covered.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Returns true if `(x, y)` lies inside the tile.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

impl fmt::Display for TileBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})-({},{})", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Nominal tile size in output-canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSize {
    /// Tile width in pixels.
    pub width: usize,
    /// Tile height in pixels.
    pub height: usize,
}

impl TileSize {
    /// Creates a tile size, rejecting zero dimensions.
    pub fn new(width: usize, height: usize) -> MontageResult<Self> {
        if width == 0 || height == 0 {
            return Err(MontageError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Derives the tile height from the target image's aspect ratio.
    ///
    /// `height = trunc(width * target_height / target_width)`, so tiles keep
    /// the proportions of the target.
    pub fn from_aspect(
        width: usize,
        target_width: usize,
        target_height: usize,
    ) -> MontageResult<Self> {
        if target_width == 0 || target_height == 0 {
            return Err(MontageError::InvalidDimensions {
                width: target_width,
                height: target_height,
            });
        }
        let height = width
            .checked_mul(target_height)
            .ok_or(MontageError::InvalidDimensions {
                width,
                height: target_height,
            })?
            / target_width;
        Self::new(width, height)
    }
}

/// Splits a `canvas_width x canvas_height` canvas into tiles.
///
/// The result is a perfect tiling: every pixel is covered by exactly one
/// tile, and there are `ceil(W / tw) * ceil(H / th)` tiles.
pub fn partition(
    canvas_width: usize,
    canvas_height: usize,
    tile_width: usize,
    tile_height: usize,
) -> MontageResult<Vec<TileBounds>> {
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

    let mut tiles =
        Vec::with_capacity(tile_count(canvas_width, canvas_height, tile_width, tile_height));
    let mut x0 = 0;
    while x0 < canvas_width {
        let x1 = x0.saturating_add(tile_width).min(canvas_width);
        let mut y0 = 0;
        while y0 < canvas_height {
            let y1 = y0.saturating_add(tile_height).min(canvas_height);
            tiles.push(TileBounds { x0, y0, x1, y1 });
            y0 = y1;
        }
        x0 = x1;
    }
    Ok(tiles)
}

/// Number of tiles `partition` produces; zero for degenerate inputs.
pub fn tile_count(
    canvas_width: usize,
    canvas_height: usize,
    tile_width: usize,
    tile_height: usize,
) -> usize {
    if tile_width == 0 || tile_height == 0 {
        return 0;
    }
    canvas_width.div_ceil(tile_width) * canvas_height.div_ceil(tile_height)
}
