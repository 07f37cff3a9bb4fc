//! Pairwise normalized cross-correlation over section stacks.
//!
//! The sweep correlates each section against its `comparison_range` nearest
//! followers and fills a banded symmetric similarity matrix, the input to
//! z-coordinate inference. Rows are computed in parallel when the `rayon`
//! feature is enabled and merged only after every worker has finished, so the
//! output is identical to the serial sweep.

pub(crate) mod scalar;

#[cfg(feature = "simd")]
pub(crate) mod simd;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;

use crate::matrix::SimilarityMatrix;
use crate::trace::{trace_event, trace_span};
use crate::util::{ZCorrectError, ZCorrectResult};

#[cfg(not(feature = "simd"))]
use scalar::ncc_sums;
#[cfg(feature = "simd")]
use simd::ncc_sums;

/// Owned stack of equally sized grayscale sections in contiguous
/// section-major layout.
pub struct SectionStack {
    data: Vec<f32>,
    width: usize,
    height: usize,
    sections: usize,
}

impl SectionStack {
    /// Builds a stack from contiguous section-major data.
    ///
    /// The buffer length must be a non-zero multiple of `width * height`.
    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> ZCorrectResult<Self> {
        if width == 0 || height == 0 {
            return Err(ZCorrectError::InvalidDimensions { width, height });
        }
        let section_len = width
            .checked_mul(height)
            .ok_or(ZCorrectError::InvalidDimensions { width, height })?;
        if data.is_empty() || data.len() % section_len != 0 {
            return Err(ZCorrectError::BufferTooSmall {
                needed: data.len().next_multiple_of(section_len).max(section_len),
                got: data.len(),
            });
        }
        let sections = data.len() / section_len;
        Ok(Self {
            data,
            width,
            height,
            sections,
        })
    }

    /// Section width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Section height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of sections in the stack.
    pub fn num_sections(&self) -> usize {
        self.sections
    }

    /// Returns the pixels of section `z` if it is within the stack.
    pub fn section(&self, z: usize) -> Option<&[f32]> {
        if z >= self.sections {
            return None;
        }
        let len = self.width * self.height;
        let start = z * len;
        self.data.get(start..start + len)
    }
}

/// Pearson normalized cross-correlation of two equally sized sections.
///
/// Returns a value in `[-1, 1]`, or `NaN` when either section has zero
/// variance. Panics when the sections differ in size.
pub fn ncc(a: &[f32], b: &[f32]) -> f64 {
    assert_eq!(a.len(), b.len(), "sections must have equal size");
    let n = a.len() as f64;
    let (sum_a, sum_b, sum_ab, sum_aa, sum_bb) = ncc_sums(a, b);
    let var_a = sum_aa - sum_a * sum_a / n;
    let var_b = sum_bb - sum_b * sum_b / n;
    let denom = (var_a * var_b).sqrt();
    if !(denom > 0.0) {
        return f64::NAN;
    }
    (sum_ab - sum_a * sum_b / n) / denom
}

pub(crate) fn band_row(stack: &SectionStack, comparison_range: usize, i: usize) -> Vec<(usize, f64)> {
    let Some(reference) = stack.section(i) else {
        return Vec::new();
    };
    let end = stack
        .num_sections()
        .min(i.saturating_add(comparison_range).saturating_add(1));
    let mut row = Vec::with_capacity(end.saturating_sub(i + 1));
    for k in (i + 1)..end {
        let comparison = stack.section(k).expect("section index below num_sections");
        row.push((k, ncc(reference, comparison)));
    }
    row
}

/// Sweeps the banded pairwise similarity of a stack.
///
/// Each section is correlated against its `comparison_range` nearest
/// followers; the result is symmetric with 1.0 on the diagonal and the
/// missing sentinel outside the band.
pub fn similarity_matrix(stack: &SectionStack, comparison_range: usize) -> SimilarityMatrix {
    let n = stack.num_sections();
    let _span = trace_span!("similarity_matrix", sections = n, range = comparison_range).entered();

    let mut matrix = SimilarityMatrix::with_unit_diagonal(n);

    #[cfg(feature = "rayon")]
    let rows = rayon::band_rows_par(stack, comparison_range);
    #[cfg(not(feature = "rayon"))]
    let rows: Vec<Vec<(usize, f64)>> = (0..n)
        .map(|i| band_row(stack, comparison_range, i))
        .collect();

    let mut pairs = 0usize;
    for (i, row) in rows.into_iter().enumerate() {
        for (k, value) in row {
            matrix.set(i, k, value);
            matrix.set(k, i, value);
            pairs += 1;
        }
    }
    trace_event!("similarity_pairs", count = pairs);
    matrix
}
