//! Row-parallel similarity sweep (feature-gated).
//!
//! Each worker owns a distinct reference section and produces that row's
//! banded correlations; rows are merged into the matrix only after the
//! parallel iterator has joined, so no two workers ever write the same cell.

use rayon::prelude::*;

use super::{band_row, SectionStack};

pub(crate) fn band_rows_par(
    stack: &SectionStack,
    comparison_range: usize,
) -> Vec<Vec<(usize, f64)>> {
    (0..stack.num_sections())
        .into_par_iter()
        .map(|i| band_row(stack, comparison_range, i))
        .collect()
}
