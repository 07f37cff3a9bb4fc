//! Error types for zcorrect.

use thiserror::Error;

/// Result alias for zcorrect operations.
pub type ZCorrectResult<T> = std::result::Result<T, ZCorrectError>;

/// Errors that can occur when building stores, tables, and transforms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZCorrectError {
    /// A buffer dimension is zero or overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A backing buffer is shorter than its dimensions require.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall {
        /// Minimum length implied by the dimensions.
        needed: usize,
        /// Actual buffer length.
        got: usize,
    },
    /// A correlation volume's offset axis disagrees with its comparison window.
    #[error("comparison window of length {expected} does not match offset axis of length {got}")]
    WindowMismatch {
        /// Window length from the section metadata.
        expected: usize,
        /// Offset-axis length of the supplied volume.
        got: usize,
    },
    /// A caller-supplied matrix has the wrong dimension.
    #[error("matrix dimension mismatch: expected {expected}, got {got}")]
    MatrixSizeMismatch {
        /// Dimension implied by the store's section range.
        expected: usize,
        /// Dimension of the supplied matrix.
        got: usize,
    },
    /// A lookup table decreases at the given index.
    #[error("lookup table is not monotonic at index {index}")]
    NonMonotonicTable {
        /// Index of the first offending entry.
        index: usize,
    },
    /// A lookup table has fewer than two entries.
    #[error("lookup table too short: {len} entries, need at least 2")]
    TableTooShort {
        /// Number of entries supplied.
        len: usize,
    },
    /// A lookup-table grid shape does not match its backing buffer.
    #[error("invalid lut grid: {reason}")]
    InvalidGrid {
        /// Why the grid was rejected.
        reason: &'static str,
    },
    /// A permutation array is not a bijection on its index range.
    #[error("invalid permutation: {reason}")]
    InvalidPermutation {
        /// Why the permutation was rejected.
        reason: &'static str,
    },
    /// A transform's dimensionality does not fit its table or grid.
    #[error("invalid transform: {reason}")]
    InvalidTransform {
        /// Why the transform was rejected.
        reason: &'static str,
    },
}
