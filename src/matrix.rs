//! Dense pairwise similarity matrices.
//!
//! A `SimilarityMatrix` is a square row-major `f64` buffer with one
//! row/column per section. `NaN` is the missing sentinel: it marks pairs for
//! which no measurement exists and must be filtered by downstream consumers,
//! never treated as a score.

/// Square similarity matrix with a `NaN` missing sentinel.
#[derive(Clone, Debug)]
pub struct SimilarityMatrix {
    data: Vec<f64>,
    dim: usize,
}

impl SimilarityMatrix {
    /// Creates a `dim x dim` matrix with every cell set to the missing sentinel.
    pub fn new(dim: usize) -> Self {
        Self {
            data: vec![f64::NAN; dim * dim],
            dim,
        }
    }

    /// Creates a sentinel-filled matrix with 1.0 self-similarity on the diagonal.
    pub fn with_unit_diagonal(dim: usize) -> Self {
        let mut matrix = Self::new(dim);
        for i in 0..dim {
            matrix.set(i, i, 1.0);
        }
        matrix
    }

    /// Returns the number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the cell at `(row, col)`. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.dim && col < self.dim, "matrix index out of bounds");
        self.data[row * self.dim + col]
    }

    /// Sets the cell at `(row, col)`. Panics when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.dim && col < self.dim, "matrix index out of bounds");
        self.data[row * self.dim + col] = value;
    }

    /// Returns row `row` as a contiguous slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Returns the full row-major backing slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Resets every cell to the missing sentinel.
    pub fn fill_missing(&mut self) {
        self.data.fill(f64::NAN);
    }

    /// Divides every cell by the largest finite entry.
    ///
    /// Sentinel cells stay `NaN`. No-op when the matrix holds no finite entry
    /// or its maximum is zero.
    pub fn normalize_max(&mut self) {
        let max = self
            .data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        if max.is_finite() && max != 0.0 {
            for value in &mut self.data {
                *value /= max;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SimilarityMatrix;

    #[test]
    fn new_matrix_is_all_missing() {
        let matrix = SimilarityMatrix::new(2);
        assert!(matrix.as_slice().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn unit_diagonal_sets_self_similarity() {
        let matrix = SimilarityMatrix::with_unit_diagonal(3);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 1.0);
        }
        assert!(matrix.get(0, 1).is_nan());
    }

    #[test]
    fn normalize_max_scales_finite_cells_only() {
        let mut matrix = SimilarityMatrix::new(2);
        matrix.set(0, 0, 4.0);
        matrix.set(0, 1, 2.0);
        matrix.normalize_max();
        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(0, 1), 0.5);
        assert!(matrix.get(1, 0).is_nan());
    }

    #[test]
    fn normalize_max_skips_all_missing_matrix() {
        let mut matrix = SimilarityMatrix::new(2);
        matrix.normalize_max();
        assert!(matrix.as_slice().iter().all(|v| v.is_nan()));
    }
}
