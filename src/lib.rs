//! Montage is a photomosaic planning library.
//!
//! A target image is split into a grid of tiles on an upscaled canvas. Each
//! tile's mean color is sampled from the native target, matched against a
//! palette of donor colors and recorded in a [`PlacementPlan`] that maps each
//! donor to the tile origins it fills. Tile processing can run on rayon
//! with the `rayon` feature; the `image-io` feature adds loading, saving and
//! donor compositing through the `image` crate.

pub mod color;
pub mod compose;
pub mod grid;
pub mod image;
pub mod matching;
pub mod palette;
pub mod plan;
pub mod sample;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use color::{euclidean_distance, Color};
pub use compose::render_pixelated;
pub use grid::{partition, tile_count, TileBounds, TileSize};
pub use crate::image::{ImageView, OwnedImage};
pub use matching::{collect_candidates, find_closest, Candidates, MatchResult};
pub use palette::{Palette, PaletteEntry, PaletteIndex};
pub use plan::{build_plan, CancelToken, PlacementPlan, PlanConfig, Planner, Point, TileReport};
pub use sample::{average_color, average_color_full, to_native, NativeRegion};
pub use util::{MontageError, MontageResult, Stage};
