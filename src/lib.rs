//! ZCorrect estimates and corrects z-position drift in serial-section stacks.
//!
//! The crate stores windowed pairwise similarity measurements per section,
//! assembles them into dense matrices for coordinate inference, and applies
//! grids of monotonic lookup tables as continuous, invertible coordinate
//! transforms for warping. A banded NCC sweep produces the similarity input,
//! with optional parallelism via the `rayon` feature and SIMD accumulation
//! via `simd`.

pub mod config;
pub mod lut;
pub mod matrix;
pub mod similarity;
pub mod store;
mod trace;
pub mod util;

pub use config::CorrectionOptions;
pub use lut::{
    LutGrid, LutGridTransform, LutRealTransform, LutTable, PermutationTransform, SectionTransform,
    SingleDimensionLutTransform, SingleDimensionPermutationTransform, ABOVE_RANGE, BELOW_RANGE,
};
pub use matrix::SimilarityMatrix;
pub use similarity::{ncc, similarity_matrix, SectionStack};
pub use store::{CorrelationStore, CorrelationVolume, Meta};
pub use util::arrays::{sorted_indices, starting_coordinates};
pub use util::{ZCorrectError, ZCorrectResult};
