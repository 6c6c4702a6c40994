//! Closest-color search over a palette.
//!
//! The search is an exhaustive linear scan. A candidate set is refined
//! progressively while scanning:
//!
//! - an entry at distance `d` with `d + tolerance < best` replaces the whole
//!   set and becomes the new best;
//! - an entry with `d == best` exactly joins the set;
//! - an entry with `best < d < best + tolerance` is ignored.
//!
//! The tolerance therefore gates replacement only; it never widens the set
//! of accumulated ties. The one exception is an exact color match: an entry
//! at distance zero always replaces a positive best, so a palette holding
//! the query color can never lose to a farther entry scanned earlier. With
//! `tolerance == 0` this exception is unobservable.
//!
//! After the scan one candidate is drawn uniformly at random.

use crate::color::{euclidean_distance, Color};
use crate::palette::PaletteIndex;
use crate::util::{MontageError, MontageResult};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Selected donor and its distance to the query color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult<'a> {
    /// Identifier of the selected donor.
    pub id: &'a str,
    /// Euclidean RGB distance between the query and the donor color.
    pub distance: f64,
}

/// Candidates left after the scan, all at `distance` from the query.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidates<'a> {
    ids: Vec<&'a str>,
    distance: f64,
}

impl<'a> Candidates<'a> {
    /// Candidate identifiers in scan order.
    pub fn ids(&self) -> &[&'a str] {
        &self.ids
    }

    /// Distance shared by every candidate.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Draws one candidate uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> MontageResult<MatchResult<'a>> {
        let id = self
            .ids
            .choose(rng)
            .copied()
            .ok_or(MontageError::EmptyCandidateSet)?;
        Ok(MatchResult {
            id,
            distance: self.distance,
        })
    }
}

/// Rejects negative, NaN and infinite tolerances.
pub fn validate_tolerance(tolerance: f64) -> MontageResult<()> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(MontageError::InvalidTolerance { tolerance });
    }
    Ok(())
}

/// Scans `index` and returns the tied best candidates for `query`.
pub fn collect_candidates<'a, P>(
    query: Color,
    index: &'a P,
    tolerance: f64,
) -> MontageResult<Candidates<'a>>
where
    P: PaletteIndex,
{
    validate_tolerance(tolerance)?;
    if index.is_empty() {
        return Err(MontageError::EmptyIndex);
    }

    let mut best = f64::INFINITY;
    let mut ids: Vec<&'a str> = Vec::new();
    for entry in index.entries() {
        let d = euclidean_distance(query, entry.color);
        let exact = d == 0.0 && best > 0.0;
        if d + tolerance < best || exact {
            ids.clear();
            ids.push(entry.id);
            best = d;
        } else if d == best {
            ids.push(entry.id);
        }
    }

    if ids.is_empty() {
        return Err(MontageError::EmptyCandidateSet);
    }
    Ok(Candidates {
        ids,
        distance: best,
    })
}

/// Finds the palette entry closest to `query`, breaking ties with `rng`.
///
/// # Errors
///
/// Returns [`MontageError::EmptyIndex`] when the palette has no entries and
/// [`MontageError::InvalidTolerance`] for a negative or non-finite tolerance.
pub fn find_closest<'a, P, R>(
    query: Color,
    index: &'a P,
    tolerance: f64,
    rng: &mut R,
) -> MontageResult<MatchResult<'a>>
where
    P: PaletteIndex,
    R: Rng + ?Sized,
{
    collect_candidates(query, index, tolerance)?.choose(rng)
}
