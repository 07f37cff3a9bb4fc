//! Invertible real-coordinate transforms built from lookup tables.
//!
//! These are the point-evaluation transforms handed to a resampling loop:
//! one shared table warping every axis (similarity-matrix warps), one shared
//! table warping a single axis (stack warps), and a grid-backed variant for
//! spatially varying correction. Forward and inverse evaluation saturate to
//! the checked-range sentinels instead of failing, so a resampler can treat
//! out-of-range output as "no source sample".

use crate::util::{ZCorrectError, ZCorrectResult};

use super::{
    LutGrid, LutTable, PermutationTransform, SingleDimensionPermutationTransform,
};

/// Applies one shared table identically to every axis of a point.
#[derive(Clone, Debug)]
pub struct LutRealTransform {
    table: LutTable,
    num_dimensions: usize,
}

impl LutRealTransform {
    /// Builds a transform over `num_dimensions`-dimensional points.
    pub fn new(table: LutTable, num_dimensions: usize) -> Self {
        Self {
            table,
            num_dimensions,
        }
    }

    /// Point dimensionality.
    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    /// The shared table.
    pub fn table(&self) -> &LutTable {
        &self.table
    }

    /// Warps every axis forward, saturating out-of-range axes.
    pub fn apply(&self, source: &[f64], target: &mut [f64]) {
        debug_assert_eq!(source.len(), self.num_dimensions);
        for (s, t) in source.iter().zip(target.iter_mut()) {
            *t = self.table.apply_checked(*s);
        }
    }

    /// Warps every axis backward, saturating out-of-range axes.
    pub fn apply_inverse(&self, source: &[f64], target: &mut [f64]) {
        debug_assert_eq!(source.len(), self.num_dimensions);
        for (s, t) in source.iter().zip(target.iter_mut()) {
            *t = self.table.apply_inverse_checked(*s);
        }
    }
}

/// Applies one shared table to a single designated axis.
#[derive(Clone, Debug)]
pub struct SingleDimensionLutTransform {
    table: LutTable,
    num_dimensions: usize,
    axis: usize,
}

impl SingleDimensionLutTransform {
    /// Builds a transform over `num_dimensions`-dimensional points that warps
    /// `axis`.
    pub fn new(table: LutTable, num_dimensions: usize, axis: usize) -> ZCorrectResult<Self> {
        if axis >= num_dimensions {
            return Err(ZCorrectError::InvalidTransform {
                reason: "transformed axis out of range",
            });
        }
        Ok(Self {
            table,
            num_dimensions,
            axis,
        })
    }

    /// Point dimensionality.
    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    /// The transformed axis.
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// The shared table.
    pub fn table(&self) -> &LutTable {
        &self.table
    }

    /// Warps the designated axis forward, copying every other axis through.
    pub fn apply(&self, source: &[f64], target: &mut [f64]) {
        target.copy_from_slice(source);
        target[self.axis] = self.table.apply_checked(source[self.axis]);
    }

    /// Warps the designated axis backward, copying every other axis through.
    pub fn apply_inverse(&self, source: &[f64], target: &mut [f64]) {
        target.copy_from_slice(source);
        target[self.axis] = self.table.apply_inverse_checked(source[self.axis]);
    }
}

/// Spatially varying transform: the designated axis is warped by the table
/// interpolated at the point's remaining coordinates.
#[derive(Clone, Debug)]
pub struct LutGridTransform {
    grid: LutGrid,
    num_dimensions: usize,
    axis: usize,
}

impl LutGridTransform {
    /// Builds a transform over `num_dimensions`-dimensional points.
    ///
    /// The grid's rank must be one less than the point rank: every non-axis
    /// coordinate selects a grid position.
    pub fn new(grid: LutGrid, num_dimensions: usize, axis: usize) -> ZCorrectResult<Self> {
        if axis >= num_dimensions {
            return Err(ZCorrectError::InvalidTransform {
                reason: "transformed axis out of range",
            });
        }
        if grid.num_grid_dimensions() != num_dimensions - 1 {
            return Err(ZCorrectError::InvalidTransform {
                reason: "grid rank must be one less than the point rank",
            });
        }
        Ok(Self {
            grid,
            num_dimensions,
            axis,
        })
    }

    /// Point dimensionality.
    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    /// The transformed axis.
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// The backing grid.
    pub fn grid(&self) -> &LutGrid {
        &self.grid
    }

    fn grid_coordinates(&self, point: &[f64]) -> Vec<f64> {
        point
            .iter()
            .enumerate()
            .filter(|&(axis, _)| axis != self.axis)
            .map(|(_, &coordinate)| coordinate)
            .collect()
    }

    /// Warps the designated axis forward, copying every other axis through.
    pub fn apply(&self, source: &[f64], target: &mut [f64]) {
        let coordinates = self.grid_coordinates(source);
        target.copy_from_slice(source);
        target[self.axis] = self.grid.apply_checked(&coordinates, source[self.axis]);
    }

    /// Warps the designated axis backward, copying every other axis through.
    pub fn apply_inverse(&self, source: &[f64], target: &mut [f64]) {
        let coordinates = self.grid_coordinates(source);
        target.copy_from_slice(source);
        target[self.axis] = self
            .grid
            .apply_inverse_checked(&coordinates, source[self.axis]);
    }
}

/// Closed set of section-coordinate transforms, selected at construction.
///
/// One capability (`apply`, `apply_inverse`, `min_coordinate`,
/// `max_coordinate`) over every variant, so warping code does not branch on
/// the concrete transform. Permutation variants act on the integer lattice;
/// fractional inputs round to the nearest section index.
#[derive(Clone, Debug)]
pub enum SectionTransform {
    /// One shared table warping every axis.
    Lut(LutRealTransform),
    /// One shared table warping a single axis.
    SingleDimensionLut(SingleDimensionLutTransform),
    /// A grid of tables warping a single axis, interpolated spatially.
    Grid(LutGridTransform),
    /// Integer reindexing of every axis.
    Permutation(PermutationTransform),
    /// Integer reindexing of one axis.
    SingleDimensionPermutation(SingleDimensionPermutationTransform),
}

impl SectionTransform {
    /// Forward point evaluation.
    pub fn apply(&self, source: &[f64], target: &mut [f64]) {
        match self {
            Self::Lut(transform) => transform.apply(source, target),
            Self::SingleDimensionLut(transform) => transform.apply(source, target),
            Self::Grid(transform) => transform.apply(source, target),
            Self::Permutation(transform) => transform.apply_rounded(source, target),
            Self::SingleDimensionPermutation(transform) => transform.apply_rounded(source, target),
        }
    }

    /// Inverse point evaluation.
    pub fn apply_inverse(&self, source: &[f64], target: &mut [f64]) {
        match self {
            Self::Lut(transform) => transform.apply_inverse(source, target),
            Self::SingleDimensionLut(transform) => transform.apply_inverse(source, target),
            Self::Grid(transform) => transform.apply_inverse(source, target),
            Self::Permutation(transform) => transform.apply_inverse_rounded(source, target),
            Self::SingleDimensionPermutation(transform) => {
                transform.apply_inverse_rounded(source, target)
            }
        }
    }

    /// Smallest corrected coordinate the transform can produce at `point`.
    pub fn min_coordinate(&self, point: &[f64]) -> f64 {
        match self {
            Self::Lut(transform) => transform.table().min_value(),
            Self::SingleDimensionLut(transform) => transform.table().min_value(),
            Self::Grid(transform) => {
                let coordinates = transform.grid_coordinates(point);
                transform.grid().min_transformed_coordinate(&coordinates)
            }
            Self::Permutation(_) | Self::SingleDimensionPermutation(_) => 0.0,
        }
    }

    /// Largest corrected coordinate the transform can produce at `point`.
    pub fn max_coordinate(&self, point: &[f64]) -> f64 {
        match self {
            Self::Lut(transform) => transform.table().max_value(),
            Self::SingleDimensionLut(transform) => transform.table().max_value(),
            Self::Grid(transform) => {
                let coordinates = transform.grid_coordinates(point);
                transform.grid().max_transformed_coordinate(&coordinates)
            }
            Self::Permutation(transform) => (transform.len() - 1) as f64,
            Self::SingleDimensionPermutation(transform) => {
                (transform.permutation().len() - 1) as f64
            }
        }
    }
}
