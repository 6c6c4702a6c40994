//! Placement plans: donor identifier to tile anchors.

use std::collections::BTreeMap;

/// Tile origin in output-canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

/// Where each donor image is drawn on the output canvas.
///
/// Donors iterate in identifier order; each donor's anchors keep the order
/// in which tiles were enumerated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementPlan {
    anchors: BTreeMap<String, Vec<Point>>,
    canvas_width: usize,
    canvas_height: usize,
    tile_width: usize,
    tile_height: usize,
    tiles: usize,
}

impl PlacementPlan {
    /// Creates an empty plan for a canvas and nominal tile size.
    pub fn new(
        canvas_width: usize,
        canvas_height: usize,
        tile_width: usize,
        tile_height: usize,
    ) -> Self {
        Self {
            anchors: BTreeMap::new(),
            canvas_width,
            canvas_height,
            tile_width,
            tile_height,
            tiles: 0,
        }
    }

    /// Appends a tile anchor to `id`'s list.
    pub fn push(&mut self, id: &str, point: Point) {
        // Only allocate the key the first time a donor is seen.
        match self.anchors.get_mut(id) {
            Some(points) => points.push(point),
            None => {
                self.anchors.insert(id.to_owned(), vec![point]);
            }
        }
        self.tiles += 1;
    }

    /// Anchors assigned to `id`, if any.
    pub fn anchors(&self, id: &str) -> Option<&[Point]> {
        self.anchors.get(id).map(Vec::as_slice)
    }

    /// Iterates over `(id, anchors)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Point])> + '_ {
        self.anchors
            .iter()
            .map(|(id, points)| (id.as_str(), points.as_slice()))
    }

    /// Number of distinct donors used.
    pub fn donor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Total number of placed tiles across all donors.
    pub fn tile_count(&self) -> usize {
        self.tiles
    }

    /// Output canvas `(width, height)`.
    pub fn canvas_size(&self) -> (usize, usize) {
        (self.canvas_width, self.canvas_height)
    }

    /// Nominal `(width, height)` donors are resized to.
    pub fn tile_size(&self) -> (usize, usize) {
        (self.tile_width, self.tile_height)
    }

    /// Returns true if no tile has been placed.
    pub fn is_empty(&self) -> bool {
        self.tiles == 0
    }
}
