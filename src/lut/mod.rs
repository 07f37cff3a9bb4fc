//! Lookup-table coordinate transforms for z-position correction.
//!
//! A lookup table maps integer section indices to corrected real-valued z
//! positions; fractional queries interpolate linearly and inversion runs a
//! floor-index search over the monotonic table. Tables can be arranged in a
//! spatial grid and blended with N-linear interpolation for spatially varying
//! correction, or applied as one global table. Permutation transforms
//! reindex sections on the integer lattice without interpolation.

mod grid;
mod permutation;
mod table;
mod transform;

pub use grid::LutGrid;
pub use permutation::{PermutationTransform, SingleDimensionPermutationTransform};
pub use table::LutTable;
pub use transform::{
    LutGridTransform, LutRealTransform, SectionTransform, SingleDimensionLutTransform,
};

/// Sentinel returned by checked lookups below the defined range.
pub const BELOW_RANGE: f64 = f64::MIN;

/// Sentinel returned by checked lookups above the defined range.
pub const ABOVE_RANGE: f64 = f64::MAX;

/// Linear interpolation between the `floor(t)` and `floor(t) + 1` entries.
///
/// The floor index is clamped to `max_index - 1`, so the `+1` lookup stays in
/// range and `t == max_index` returns the last entry exactly.
pub(crate) fn apply_entries(entry: impl Fn(usize) -> f64, max_index: usize, lut_coordinate: f64) -> f64 {
    debug_assert!(
        (0.0..=max_index as f64).contains(&lut_coordinate),
        "lut coordinate {lut_coordinate} outside [0, {max_index}]"
    );
    let floor = (lut_coordinate as usize).min(max_index - 1);
    let frac = lut_coordinate - floor as f64;
    let floor_val = entry(floor);
    let next_val = entry(floor + 1);
    (next_val - floor_val) * frac + floor_val
}

/// Halving search for the largest index `i` with `entry(i) <= value`.
///
/// The result lies in `[0, max_index - 1]`, so `i + 1` is always a valid
/// bracket. Terminates for any entry contents because the `[min, max]`
/// interval strictly shrinks; the result is only meaningful for monotonic
/// non-decreasing entries.
pub(crate) fn floor_index_entries(
    entry: impl Fn(usize) -> f64,
    max_index: usize,
    value: f64,
) -> usize {
    let mut min = 0usize;
    let mut max = max_index;
    let mut i = max >> 1;
    loop {
        if entry(i) > value {
            max = i;
        } else {
            min = i;
        }
        let next = ((max - min) >> 1) + min;
        if next == min {
            return next;
        }
        i = next;
    }
}

/// Fractional inverse: position of `value` inside its bracketing interval.
///
/// Division by zero when the bracket has zero width (duplicate adjacent
/// entries); callers that admit duplicates must guard against it.
pub(crate) fn inverse_entries(
    entry: impl Fn(usize) -> f64,
    max_index: usize,
    real_coordinate: f64,
) -> f64 {
    let i = floor_index_entries(&entry, max_index, real_coordinate);
    let z1 = entry(i);
    let z2 = entry(i + 1);
    (real_coordinate - z1) / (z2 - z1) + i as f64
}
