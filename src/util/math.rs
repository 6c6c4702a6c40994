//! Integer helpers for output-to-native coordinate transforms.

/// Divides and rounds toward zero, matching `int(value / divisor)`.
pub(crate) fn div_floor(value: usize, divisor: usize) -> usize {
    value / divisor
}

/// Divides and rounds up, matching `ceil(value / divisor)`.
pub(crate) fn div_ceil(value: usize, divisor: usize) -> usize {
    value.div_ceil(divisor)
}

/// Mixes a plan seed with a tile index into an independent per-tile seed.
///
/// SplitMix64 finalizer; adjacent indices yield unrelated streams.
pub(crate) fn mix_seed(seed: u64, index: usize) -> u64 {
    let mut z = seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
