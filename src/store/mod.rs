//! Pairwise correlation storage and dense matrix assembly.
//!
//! `CorrelationStore` owns, per section index, a small volume of correlation
//! values and the comparison window they were measured over. Matrix assembly
//! turns those sparse, windowed measurements into a dense banded matrix for
//! the inference step: each row carries its section's window clipped to the
//! global range, every other cell stays at the `NaN` missing sentinel.

mod volume;

pub use volume::CorrelationVolume;

use std::collections::BTreeMap;

use crate::matrix::SimilarityMatrix;
use crate::trace::trace_span;
use crate::util::{ZCorrectError, ZCorrectResult};

/// Per-section metadata: the half-open window of section indices the section
/// was compared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Meta {
    /// First section index of the comparison window (inclusive).
    pub z_coordinate_min: usize,
    /// End of the comparison window (exclusive).
    pub z_coordinate_max: usize,
}

impl Meta {
    /// Returns the window length.
    pub fn window_len(&self) -> usize {
        self.z_coordinate_max.saturating_sub(self.z_coordinate_min)
    }
}

/// Stores per-section correlation volumes and assembles dense similarity matrices.
///
/// The global section range `[z_min, z_max)` is derived from the inserted
/// indices. Matrix extraction is a pure function of stored state: repeated
/// calls on unchanged data produce bit-identical output.
#[derive(Debug, Default)]
pub struct CorrelationStore {
    volumes: BTreeMap<usize, CorrelationVolume>,
    metas: BTreeMap<usize, Meta>,
}

impl CorrelationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the correlation volume and metadata for `index`.
    ///
    /// The volume's offset axis must have exactly one entry per window
    /// position; a disagreement would silently mis-assign matrix cells, so it
    /// is rejected here instead.
    pub fn add_correlations(
        &mut self,
        index: usize,
        volume: CorrelationVolume,
        meta: Meta,
    ) -> ZCorrectResult<()> {
        let expected = meta.window_len();
        if volume.offsets() != expected {
            return Err(ZCorrectError::WindowMismatch {
                expected,
                got: volume.offsets(),
            });
        }
        self.volumes.insert(index, volume);
        self.metas.insert(index, meta);
        Ok(())
    }

    /// Returns true when no section has been inserted.
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }

    /// Returns the metadata stored for `index`, if any.
    pub fn meta(&self, index: usize) -> Option<&Meta> {
        self.metas.get(&index)
    }

    /// First section index the store can answer for (0 when empty).
    pub fn z_min(&self) -> usize {
        self.metas.keys().next().copied().unwrap_or(0)
    }

    /// End of the section range (exclusive; 0 when empty).
    pub fn z_max(&self) -> usize {
        self.metas.keys().next_back().map(|&z| z + 1).unwrap_or(0)
    }

    /// First valid x sample coordinate.
    pub fn x_min(&self) -> usize {
        0
    }

    /// First valid y sample coordinate.
    pub fn y_min(&self) -> usize {
        0
    }

    /// End of the x sample range (exclusive; 0 when empty).
    pub fn x_max(&self) -> usize {
        self.volumes.values().next().map_or(0, |v| v.width())
    }

    /// End of the y sample range (exclusive; 0 when empty).
    pub fn y_max(&self) -> usize {
        self.volumes.values().next().map_or(0, |v| v.height())
    }

    /// Returns the dense cross product of valid `(x, y)` sample coordinates.
    ///
    /// The extent comes from the first stored volume; all sections are
    /// assumed to share it.
    pub fn sample_coordinates(&self) -> Vec<(usize, usize)> {
        let mut coordinates = Vec::with_capacity(self.x_max() * self.y_max());
        for x in self.x_min()..self.x_max() {
            for y in self.y_min()..self.y_max() {
                coordinates.push((x, y));
            }
        }
        coordinates
    }

    /// Assembles the dense similarity matrix for pixel `(x, y)`.
    pub fn to_matrix(&self, x: usize, y: usize) -> SimilarityMatrix {
        let dim = self.z_max() - self.z_min();
        let mut matrix = SimilarityMatrix::new(dim);
        self.fill_matrix(x, y, &mut matrix);
        matrix
    }

    /// Assembles the matrix for pixel `(x, y)` into caller-supplied storage.
    ///
    /// The matrix must be `(z_max - z_min)` square; its previous contents are
    /// reset to the missing sentinel before filling.
    pub fn to_matrix_into(
        &self,
        x: usize,
        y: usize,
        matrix: &mut SimilarityMatrix,
    ) -> ZCorrectResult<()> {
        let expected = self.z_max() - self.z_min();
        if matrix.dim() != expected {
            return Err(ZCorrectError::MatrixSizeMismatch {
                expected,
                got: matrix.dim(),
            });
        }
        matrix.fill_missing();
        self.fill_matrix(x, y, matrix);
        Ok(())
    }

    fn fill_matrix(&self, x: usize, y: usize, matrix: &mut SimilarityMatrix) {
        let z_min = self.z_min();
        let z_max = self.z_max();
        let _span = trace_span!("to_matrix", x = x, y = y, sections = z_max - z_min).entered();

        for z_ref in z_min..z_max {
            // A section in range with no stored volume leaves its row at the
            // missing sentinel.
            let (Some(volume), Some(meta)) = (self.volumes.get(&z_ref), self.metas.get(&z_ref))
            else {
                continue;
            };
            let row = z_ref - z_min;
            let window = volume.window(x, y);
            for (offset, z_comp) in (meta.z_coordinate_min..meta.z_coordinate_max).enumerate() {
                if z_comp < z_min || z_comp >= z_max {
                    continue;
                }
                matrix.set(row, z_comp - z_min, f64::from(window[offset]));
            }
        }
    }
}
