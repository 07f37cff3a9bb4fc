//! Correction options supplied by the interactive surface.

/// Parameters collected from the user and handed to the similarity sweep and
/// the external inference step.
///
/// The core only consumes `comparison_range` (band width of the similarity
/// sweep) and `with_reorder` (whether a permutation transform is built from
/// the estimated coordinates); the remaining fields parameterize the external
/// optimizer and are carried through unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrectionOptions {
    /// Number of following sections each section is compared against.
    pub comparison_range: usize,
    /// Outer optimization iterations.
    pub n_iterations: usize,
    /// Fraction of the estimated shift applied per outer iteration.
    pub shift_proportion: f64,
    /// Inner iterations of the multiplier estimation.
    pub multiplier_estimation_iterations: usize,
    /// Regularizer weight for multiplier generation.
    pub multiplier_generation_regularizer_weight: f64,
    /// Allow section reordering before warping.
    pub with_reorder: bool,
    /// Lower bound on the thickness assigned to any section.
    pub minimum_section_thickness: f64,
}

impl Default for CorrectionOptions {
    fn default() -> Self {
        Self {
            comparison_range: 10,
            n_iterations: 100,
            shift_proportion: 0.6,
            multiplier_estimation_iterations: 10,
            multiplier_generation_regularizer_weight: 0.1,
            with_reorder: true,
            minimum_section_thickness: 0.01,
        }
    }
}
