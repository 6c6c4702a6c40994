//! Read-only donor palettes.
//!
//! A palette maps donor identifiers (file paths, content hashes) to their
//! representative color. The planner only reads it; iteration order is
//! unspecified and distinct identifiers may share a color.

use crate::color::Color;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// One donor identifier and its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry<'a> {
    /// Opaque donor identifier.
    pub id: &'a str,
    /// Representative color of the donor.
    pub color: Color,
}

/// Read interface consumed by the match engine.
///
/// `entries` must be finite and restartable: every call yields the full
/// palette again.
pub trait PaletteIndex {
    /// Number of donors in the palette.
    fn len(&self) -> usize;

    /// Iterates over all donors in unspecified order.
    fn entries(&self) -> impl Iterator<Item = PaletteEntry<'_>> + '_;

    /// Returns true if the palette has no donors.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory palette with unique identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<String, Color>,
}

impl Palette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a donor, returning the color previously stored under `id`.
    pub fn insert(&mut self, id: impl Into<String>, color: Color) -> Option<Color> {
        self.colors.insert(id.into(), color)
    }

    /// Returns the color stored for `id`.
    pub fn get(&self, id: &str) -> Option<Color> {
        self.colors.get(id).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, Color)> for Palette {
    fn from_iter<I: IntoIterator<Item = (S, Color)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().map(|(id, c)| (id.into(), c)).collect(),
        }
    }
}

impl PaletteIndex for Palette {
    fn len(&self) -> usize {
        self.colors.len()
    }

    fn entries(&self) -> impl Iterator<Item = PaletteEntry<'_>> + '_ {
        self.colors.iter().map(|(id, &color)| PaletteEntry { id, color })
    }
}

impl<S: BuildHasher> PaletteIndex for HashMap<String, Color, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> impl Iterator<Item = PaletteEntry<'_>> + '_ {
        self.iter().map(|(id, &color)| PaletteEntry { id, color })
    }
}
