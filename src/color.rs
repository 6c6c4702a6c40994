//! RGB color values and the distance used for palette matching.

use std::fmt;

/// Representative 8-bit RGB color, not gamma-corrected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the channels as an array.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_sq(self, other: Color) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Color {
    fn from(value: [u8; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(value: Color) -> Self {
        value.to_array()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Euclidean distance between two colors in RGB space.
///
/// Identical squared distances always map to bit-identical results, so exact
/// ties compare equal.
pub fn euclidean_distance(a: Color, b: Color) -> f64 {
    f64::from(a.distance_sq(b)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::{euclidean_distance, Color};

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = Color::new(10, 10, 10);
        let b = Color::new(255, 255, 255);
        assert_eq!(euclidean_distance(a, a), 0.0);
        assert_eq!(euclidean_distance(a, b), euclidean_distance(b, a));
    }

    #[test]
    fn distance_matches_known_values() {
        let query = Color::new(10, 10, 10);
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);
        assert!((euclidean_distance(query, black) - 17.3205).abs() < 1e-3);
        assert!((euclidean_distance(query, white) - 424.3524).abs() < 1e-3);
    }

    #[test]
    fn max_distance_fits_channel_range() {
        let d = Color::new(0, 0, 0).distance_sq(Color::new(255, 255, 255));
        assert_eq!(d, 3 * 255 * 255);
    }
}
