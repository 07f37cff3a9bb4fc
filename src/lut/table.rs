//! Single monotonic lookup tables.

use crate::util::{ZCorrectError, ZCorrectResult};

use super::{apply_entries, floor_index_entries, inverse_entries, ABOVE_RANGE, BELOW_RANGE};

/// Monotonic non-decreasing table mapping section indices to real z positions.
///
/// Construction validates monotonicity so inversion is well-defined. Adjacent
/// duplicate entries are accepted but make [`LutTable::apply_inverse`]
/// degenerate inside the zero-width interval.
#[derive(Clone, Debug, PartialEq)]
pub struct LutTable {
    values: Vec<f64>,
}

impl LutTable {
    /// Builds a table from at least two non-decreasing entries.
    pub fn new(values: Vec<f64>) -> ZCorrectResult<Self> {
        if values.len() < 2 {
            return Err(ZCorrectError::TableTooShort { len: values.len() });
        }
        for (index, pair) in values.windows(2).enumerate() {
            // The negated comparison also rejects NaN entries.
            if !(pair[1] >= pair[0]) {
                return Err(ZCorrectError::NonMonotonicTable { index: index + 1 });
            }
        }
        Ok(Self { values })
    }

    /// Wraps entries already known to be monotonic (interpolated grid cells).
    pub(crate) fn new_unchecked(values: Vec<f64>) -> Self {
        debug_assert!(values.len() >= 2);
        debug_assert!(values.windows(2).all(|pair| pair[1] >= pair[0]));
        Self { values }
    }

    /// Returns the table entries.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the largest valid integer lut coordinate.
    pub fn max_index(&self) -> usize {
        self.values.len() - 1
    }

    /// Maps a fractional lut coordinate to a real z position.
    ///
    /// Callers must keep `lut_coordinate` within `[0, max_index]`; route
    /// anything else through [`LutTable::apply_checked`].
    pub fn apply(&self, lut_coordinate: f64) -> f64 {
        apply_entries(|k| self.values[k], self.max_index(), lut_coordinate)
    }

    /// Like [`LutTable::apply`], saturating to the range sentinels outside
    /// `[0, max_index]`.
    pub fn apply_checked(&self, lut_coordinate: f64) -> f64 {
        if lut_coordinate < 0.0 {
            BELOW_RANGE
        } else if lut_coordinate > self.max_index() as f64 {
            ABOVE_RANGE
        } else {
            self.apply(lut_coordinate)
        }
    }

    /// Returns the largest index `i` with `values[i] <= real_coordinate`,
    /// clamped to `[0, max_index - 1]`. O(log n).
    pub fn find_floor_index(&self, real_coordinate: f64) -> usize {
        floor_index_entries(|k| self.values[k], self.max_index(), real_coordinate)
    }

    /// Maps a real z position back to a fractional lut coordinate.
    ///
    /// Degenerate (division by zero) when the bracketing entries are equal.
    pub fn apply_inverse(&self, real_coordinate: f64) -> f64 {
        inverse_entries(|k| self.values[k], self.max_index(), real_coordinate)
    }

    /// Like [`LutTable::apply_inverse`], saturating to the range sentinels
    /// outside `[min_value, max_value]`.
    pub fn apply_inverse_checked(&self, real_coordinate: f64) -> f64 {
        if real_coordinate < self.min_value() {
            BELOW_RANGE
        } else if real_coordinate > self.max_value() {
            ABOVE_RANGE
        } else {
            self.apply_inverse(real_coordinate)
        }
    }

    /// First entry of the table.
    pub fn min_value(&self) -> f64 {
        self.values[0]
    }

    /// Last entry of the table.
    pub fn max_value(&self) -> f64 {
        self.values[self.max_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::LutTable;
    use crate::util::ZCorrectError;

    #[test]
    fn rejects_nan_entries() {
        let err = LutTable::new(vec![0.0, f64::NAN, 2.0]).err().unwrap();
        assert_eq!(err, ZCorrectError::NonMonotonicTable { index: 1 });
    }

    #[test]
    fn apply_at_exact_top_returns_last_entry() {
        let table = LutTable::new(vec![1.0, 2.0, 4.0]).unwrap();
        assert_eq!(table.apply(2.0), 4.0);
    }
}
