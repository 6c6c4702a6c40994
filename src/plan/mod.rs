//! Placement planning over a whole target image.
//!
//! The planner partitions the upscaled canvas, samples each tile's color
//! from the native target, matches it against the palette and records the
//! tile origin under the chosen donor. Runs are independent; the only
//! nondeterminism is tie-breaking, which draws from a per-tile `StdRng`
//! seeded from the plan seed and the tile index. Sequential and parallel
//! runs with the same seed therefore produce identical plans.

mod cancel;
mod placement;

pub use cancel::CancelToken;
pub use placement::{PlacementPlan, Point};

use crate::color::Color;
use crate::grid::{partition, TileBounds};
use crate::image::ImageView;
use crate::matching::{find_closest, validate_tolerance};
use crate::palette::PaletteIndex;
use crate::sample::{average_color, to_native, NativeRegion};
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::math::mix_seed;
use crate::util::{MontageError, MontageResult, Stage};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "rayon")]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Configuration for a planning run.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanConfig {
    /// Integer factor between target and output canvas resolution.
    pub upscale: usize,
    /// Nominal tile width in output pixels.
    pub tile_width: usize,
    /// Nominal tile height in output pixels.
    pub tile_height: usize,
    /// Margin a new candidate must beat the current best by to replace it.
    pub tolerance: f64,
    /// Seed for tie-breaking; a fresh random seed is drawn when `None`.
    pub seed: Option<u64>,
    /// Process tiles on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            upscale: 1,
            tile_width: 32,
            tile_height: 32,
            tolerance: 0.0,
            seed: None,
            parallel: false,
        }
    }
}

impl PlanConfig {
    /// Checks every value before any tile is processed.
    pub fn validate(&self) -> MontageResult<()> {
        if self.upscale == 0 {
            return Err(MontageError::InvalidUpscale {
                upscale: self.upscale,
            });
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(MontageError::InvalidDimensions {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        validate_tolerance(self.tolerance)
    }
}

/// Diagnostic record emitted for every planned tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileReport<'a> {
    /// Position in enumeration order.
    pub index: usize,
    /// Output-space bounds.
    pub bounds: TileBounds,
    /// Native-space region the color was sampled from.
    pub native: NativeRegion,
    /// Sampled mean color.
    pub color: Color,
    /// Selected donor.
    pub id: &'a str,
    /// Distance between `color` and the donor's color.
    pub distance: f64,
}

/// Builds placement plans from a target image and a palette.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    cfg: PlanConfig,
    cancel: Option<CancelToken>,
}

impl Planner {
    /// Creates a planner with the given configuration.
    pub fn new(cfg: PlanConfig) -> Self {
        Self { cfg, cancel: None }
    }

    /// Attaches a cancellation token checked before each tile.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns the planner configuration.
    pub fn config(&self) -> &PlanConfig {
        &self.cfg
    }

    /// Builds a plan without per-tile diagnostics.
    pub fn build_plan<P>(&self, target: ImageView<'_>, palette: &P) -> MontageResult<PlacementPlan>
    where
        P: PaletteIndex + Sync,
    {
        self.build_plan_with(target, palette, |_| {})
    }

    /// Builds a plan, calling `on_tile` once per tile in enumeration order.
    ///
    /// `on_tile` only runs once every tile has been matched, so a failed run
    /// reports nothing and returns no plan.
    ///
    /// # Errors
    ///
    /// Configuration errors and [`MontageError::EmptyIndex`] are returned
    /// before any tile is processed. Per-tile failures are wrapped in
    /// [`MontageError::Tile`].
    pub fn build_plan_with<P, F>(
        &self,
        target: ImageView<'_>,
        palette: &P,
        mut on_tile: F,
    ) -> MontageResult<PlacementPlan>
    where
        P: PaletteIndex + Sync,
        F: FnMut(&TileReport<'_>),
    {
        let cfg = &self.cfg;
        cfg.validate()?;
        if palette.is_empty() {
            return Err(MontageError::EmptyIndex);
        }

        let canvas_width = target.width().checked_mul(cfg.upscale);
        let canvas_height = target.height().checked_mul(cfg.upscale);
        let (canvas_width, canvas_height) = match (canvas_width, canvas_height) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(MontageError::InvalidDimensions {
                    width: target.width(),
                    height: target.height(),
                })
            }
        };
        let tiles = partition(canvas_width, canvas_height, cfg.tile_width, cfg.tile_height)?;

        let _span = trace_span!(
            "build_plan",
            width = canvas_width,
            height = canvas_height,
            tiles = tiles.len()
        )
        .entered();

        let seed = cfg.seed.unwrap_or_else(rand::random);
        let reports = self.match_tiles(target, palette, &tiles, seed)?;

        let mut plan =
            PlacementPlan::new(canvas_width, canvas_height, cfg.tile_width, cfg.tile_height);
        for report in &reports {
            trace_debug!(
                "tile_matched",
                x0 = report.bounds.x0,
                y0 = report.bounds.y0,
                x1 = report.bounds.x1,
                y1 = report.bounds.y1,
                r = report.color.r,
                g = report.color.g,
                b = report.color.b,
                id = report.id,
                distance = report.distance,
            );
            on_tile(report);
            plan.push(
                report.id,
                Point {
                    x: report.bounds.x0,
                    y: report.bounds.y0,
                },
            );
        }

        trace_event!(
            "plan_built",
            donors = plan.donor_count(),
            tiles = plan.tile_count()
        );
        Ok(plan)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    #[cfg(feature = "rayon")]
    fn match_tiles<'p, P>(
        &self,
        target: ImageView<'_>,
        palette: &'p P,
        tiles: &[TileBounds],
        seed: u64,
    ) -> MontageResult<Vec<TileReport<'p>>>
    where
        P: PaletteIndex + Sync,
    {
        if !self.cfg.parallel {
            return self.match_tiles_seq(target, palette, tiles, seed);
        }

        let completed = AtomicUsize::new(0);
        tiles
            .par_iter()
            .enumerate()
            .map(|(index, &bounds)| {
                if self.is_cancelled() {
                    return Err(MontageError::Cancelled {
                        completed: completed.load(Ordering::Relaxed),
                    });
                }
                let report = match_tile(target, palette, &self.cfg, seed, index, bounds)?;
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(report)
            })
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn match_tiles<'p, P>(
        &self,
        target: ImageView<'_>,
        palette: &'p P,
        tiles: &[TileBounds],
        seed: u64,
    ) -> MontageResult<Vec<TileReport<'p>>>
    where
        P: PaletteIndex + Sync,
    {
        self.match_tiles_seq(target, palette, tiles, seed)
    }

    fn match_tiles_seq<'p, P>(
        &self,
        target: ImageView<'_>,
        palette: &'p P,
        tiles: &[TileBounds],
        seed: u64,
    ) -> MontageResult<Vec<TileReport<'p>>>
    where
        P: PaletteIndex,
    {
        let mut reports = Vec::with_capacity(tiles.len());
        for (index, &bounds) in tiles.iter().enumerate() {
            if self.is_cancelled() {
                return Err(MontageError::Cancelled { completed: index });
            }
            reports.push(match_tile(target, palette, &self.cfg, seed, index, bounds)?);
        }
        Ok(reports)
    }
}

fn match_tile<'p, P>(
    target: ImageView<'_>,
    palette: &'p P,
    cfg: &PlanConfig,
    seed: u64,
    index: usize,
    bounds: TileBounds,
) -> MontageResult<TileReport<'p>>
where
    P: PaletteIndex,
{
    let (native, color) = to_native(bounds, cfg.upscale)
        .and_then(|native| Ok((native, average_color(target, native)?)))
        .map_err(|err| err.at_tile(index, bounds, Stage::Sample))?;

    let mut rng = StdRng::seed_from_u64(mix_seed(seed, index));
    let found = find_closest(color, palette, cfg.tolerance, &mut rng)
        .map_err(|err| err.at_tile(index, bounds, Stage::Match))?;

    Ok(TileReport {
        index,
        bounds,
        native,
        color,
        id: found.id,
        distance: found.distance,
    })
}

/// Builds a plan in one call from individual configuration values.
///
/// Equivalent to a sequential [`Planner`] with a random seed.
pub fn build_plan<P>(
    target: ImageView<'_>,
    upscale: usize,
    tile_width: usize,
    tile_height: usize,
    palette: &P,
    tolerance: f64,
) -> MontageResult<PlacementPlan>
where
    P: PaletteIndex + Sync,
{
    Planner::new(PlanConfig {
        upscale,
        tile_width,
        tile_height,
        tolerance,
        ..PlanConfig::default()
    })
    .build_plan(target, palette)
}
