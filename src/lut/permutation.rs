//! Integer section-reindexing transforms.
//!
//! A permutation transform maps integer coordinate `k` to `permutation[k]`
//! with no interpolation and no inversion ambiguity: it is a true bijection
//! on `0..len`, used to optionally reorder sections before LUT warping.

use crate::util::{ZCorrectError, ZCorrectResult};

/// Bijective reindexing applied to every axis of an integer point.
#[derive(Clone, Debug)]
pub struct PermutationTransform {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl PermutationTransform {
    /// Builds a transform, validating that `forward` is a bijection on
    /// `0..forward.len()`.
    pub fn new(forward: Vec<usize>) -> ZCorrectResult<Self> {
        let len = forward.len();
        if len == 0 {
            return Err(ZCorrectError::InvalidPermutation {
                reason: "empty permutation",
            });
        }
        let mut inverse = vec![usize::MAX; len];
        for (source, &target) in forward.iter().enumerate() {
            if target >= len {
                return Err(ZCorrectError::InvalidPermutation {
                    reason: "target index out of range",
                });
            }
            if inverse[target] != usize::MAX {
                return Err(ZCorrectError::InvalidPermutation {
                    reason: "duplicate target index",
                });
            }
            inverse[target] = source;
        }
        Ok(Self { forward, inverse })
    }

    /// Number of indices the permutation is defined on.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Always false; construction rejects empty permutations.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Maps one index forward. Panics when `index >= len`.
    pub fn map(&self, index: usize) -> usize {
        self.forward[index]
    }

    /// Maps one index backward. Panics when `index >= len`.
    pub fn map_inverse(&self, index: usize) -> usize {
        self.inverse[index]
    }

    /// Reindexes every axis of `source` into `target`.
    pub fn apply(&self, source: &[usize], target: &mut [usize]) {
        for (s, t) in source.iter().zip(target.iter_mut()) {
            *t = self.forward[*s];
        }
    }

    /// Undoes [`PermutationTransform::apply`].
    pub fn apply_inverse(&self, source: &[usize], target: &mut [usize]) {
        for (s, t) in source.iter().zip(target.iter_mut()) {
            *t = self.inverse[*s];
        }
    }

    pub(crate) fn apply_rounded(&self, source: &[f64], target: &mut [f64]) {
        for (s, t) in source.iter().zip(target.iter_mut()) {
            *t = self.forward[s.round() as usize] as f64;
        }
    }

    pub(crate) fn apply_inverse_rounded(&self, source: &[f64], target: &mut [f64]) {
        for (s, t) in source.iter().zip(target.iter_mut()) {
            *t = self.inverse[s.round() as usize] as f64;
        }
    }
}

/// Reindexes one designated axis, passing all other axes through unchanged.
#[derive(Clone, Debug)]
pub struct SingleDimensionPermutationTransform {
    permutation: PermutationTransform,
    num_dimensions: usize,
    axis: usize,
}

impl SingleDimensionPermutationTransform {
    /// Builds a transform over `num_dimensions`-dimensional points that
    /// reindexes `axis`.
    pub fn new(forward: Vec<usize>, num_dimensions: usize, axis: usize) -> ZCorrectResult<Self> {
        if axis >= num_dimensions {
            return Err(ZCorrectError::InvalidTransform {
                reason: "reindexed axis out of range",
            });
        }
        Ok(Self {
            permutation: PermutationTransform::new(forward)?,
            num_dimensions,
            axis,
        })
    }

    /// Point dimensionality.
    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    /// The reindexed axis.
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// The underlying bijection.
    pub fn permutation(&self) -> &PermutationTransform {
        &self.permutation
    }

    /// Reindexes `axis`, copying every other axis through.
    pub fn apply(&self, source: &[usize], target: &mut [usize]) {
        target.copy_from_slice(source);
        target[self.axis] = self.permutation.map(source[self.axis]);
    }

    /// Undoes [`SingleDimensionPermutationTransform::apply`].
    pub fn apply_inverse(&self, source: &[usize], target: &mut [usize]) {
        target.copy_from_slice(source);
        target[self.axis] = self.permutation.map_inverse(source[self.axis]);
    }

    pub(crate) fn apply_rounded(&self, source: &[f64], target: &mut [f64]) {
        target.copy_from_slice(source);
        target[self.axis] = self.permutation.map(source[self.axis].round() as usize) as f64;
    }

    pub(crate) fn apply_inverse_rounded(&self, source: &[f64], target: &mut [f64]) {
        target.copy_from_slice(source);
        target[self.axis] = self.permutation.map_inverse(source[self.axis].round() as usize) as f64;
    }
}
