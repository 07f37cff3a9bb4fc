//! Grids of lookup tables with N-linear interpolation across cells.

use crate::util::{ZCorrectError, ZCorrectResult};

use super::{apply_entries, floor_index_entries, inverse_entries, LutTable, ABOVE_RANGE, BELOW_RANGE};

/// A (D+1)-dimensional array of lookup tables: D grid axes and a trailing
/// table axis.
///
/// Queries between cell centers blend the surrounding tables with N-linear
/// weights, giving smooth spatial transitions without discontinuities at cell
/// boundaries; out-of-grid coordinates clamp to the nearest cell (border
/// extension). Every query recomputes its interpolated entries, so a shared
/// grid is safe to use from multiple threads; use [`LutGrid::interpolated`]
/// to snapshot one table when evaluating many coordinates at a fixed grid
/// position.
#[derive(Clone, Debug)]
pub struct LutGrid {
    data: Vec<f64>,
    grid_dims: Vec<usize>,
    table_len: usize,
}

impl LutGrid {
    /// Builds a grid from a flattened array with the table axis fastest-varying.
    ///
    /// Grid cells are laid out row-major over `grid_dims`. Every per-cell
    /// table must be monotonic non-decreasing; a decreasing entry fails
    /// construction instead of corrupting later inversions.
    pub fn from_parts(data: Vec<f64>, grid_dims: &[usize], table_len: usize) -> ZCorrectResult<Self> {
        if table_len < 2 {
            return Err(ZCorrectError::TableTooShort { len: table_len });
        }
        if grid_dims.contains(&0) {
            return Err(ZCorrectError::InvalidGrid {
                reason: "zero-sized grid axis",
            });
        }
        let cells = grid_dims
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or(ZCorrectError::InvalidGrid {
                reason: "grid size overflows",
            })?;
        let needed = cells
            .checked_mul(table_len)
            .ok_or(ZCorrectError::InvalidGrid {
                reason: "grid size overflows",
            })?;
        if data.len() != needed {
            return Err(ZCorrectError::InvalidGrid {
                reason: "buffer length does not match grid shape",
            });
        }
        for (cell, table) in data.chunks_exact(table_len).enumerate() {
            for (index, pair) in table.windows(2).enumerate() {
                if !(pair[1] >= pair[0]) {
                    return Err(ZCorrectError::NonMonotonicTable {
                        index: cell * table_len + index + 1,
                    });
                }
            }
        }
        Ok(Self {
            data,
            grid_dims: grid_dims.to_vec(),
            table_len,
        })
    }

    /// Builds a zero-grid-dimension grid holding one global table.
    pub fn from_table(table: LutTable) -> Self {
        let values = table.values().to_vec();
        let table_len = values.len();
        Self {
            data: values,
            grid_dims: Vec::new(),
            table_len,
        }
    }

    /// Number of grid (non-transformed) axes.
    pub fn num_grid_dimensions(&self) -> usize {
        self.grid_dims.len()
    }

    /// Extents of the grid axes.
    pub fn grid_dims(&self) -> &[usize] {
        &self.grid_dims
    }

    /// Largest valid integer lut coordinate of the per-cell tables.
    pub fn lut_max_index(&self) -> usize {
        self.table_len - 1
    }

    /// Maps a fractional lut coordinate through the table interpolated at
    /// `grid_coordinates`.
    pub fn apply(&self, grid_coordinates: &[f64], lut_coordinate: f64) -> f64 {
        let pos = self.position(grid_coordinates);
        apply_entries(|k| pos.entry(k), self.lut_max_index(), lut_coordinate)
    }

    /// Like [`LutGrid::apply`], saturating to the range sentinels outside
    /// `[0, lut_max_index]`.
    pub fn apply_checked(&self, grid_coordinates: &[f64], lut_coordinate: f64) -> f64 {
        if lut_coordinate < 0.0 {
            BELOW_RANGE
        } else if lut_coordinate > self.lut_max_index() as f64 {
            ABOVE_RANGE
        } else {
            self.apply(grid_coordinates, lut_coordinate)
        }
    }

    /// Returns the largest index `i` whose interpolated entry is `<=`
    /// `real_coordinate`, clamped to `[0, lut_max_index - 1]`. O(log n).
    pub fn find_floor_index(&self, grid_coordinates: &[f64], real_coordinate: f64) -> usize {
        let pos = self.position(grid_coordinates);
        floor_index_entries(|k| pos.entry(k), self.lut_max_index(), real_coordinate)
    }

    /// Maps a real z position back to a fractional lut coordinate using the
    /// table interpolated at `grid_coordinates`.
    ///
    /// Degenerate (division by zero) when the bracketing entries are equal.
    pub fn apply_inverse(&self, grid_coordinates: &[f64], real_coordinate: f64) -> f64 {
        let pos = self.position(grid_coordinates);
        inverse_entries(|k| pos.entry(k), self.lut_max_index(), real_coordinate)
    }

    /// Like [`LutGrid::apply_inverse`], saturating to the range sentinels
    /// outside the interpolated table's value range.
    pub fn apply_inverse_checked(&self, grid_coordinates: &[f64], real_coordinate: f64) -> f64 {
        let pos = self.position(grid_coordinates);
        if real_coordinate < pos.entry(0) {
            BELOW_RANGE
        } else if real_coordinate > pos.entry(self.lut_max_index()) {
            ABOVE_RANGE
        } else {
            inverse_entries(|k| pos.entry(k), self.lut_max_index(), real_coordinate)
        }
    }

    /// First entry of the interpolated table at `grid_coordinates`.
    pub fn min_transformed_coordinate(&self, grid_coordinates: &[f64]) -> f64 {
        self.position(grid_coordinates).entry(0)
    }

    /// Last entry of the interpolated table at `grid_coordinates`.
    pub fn max_transformed_coordinate(&self, grid_coordinates: &[f64]) -> f64 {
        self.position(grid_coordinates).entry(self.lut_max_index())
    }

    /// Snapshots the interpolated table at `grid_coordinates`.
    ///
    /// The snapshot is this consumer's private cursor for hot loops; it never
    /// shares mutable state with other users of the grid. A convex blend of
    /// non-decreasing tables is itself non-decreasing.
    pub fn interpolated(&self, grid_coordinates: &[f64]) -> LutTable {
        let pos = self.position(grid_coordinates);
        let values = (0..self.table_len).map(|k| pos.entry(k)).collect();
        LutTable::new_unchecked(values)
    }

    fn position(&self, grid_coordinates: &[f64]) -> GridPosition<'_> {
        assert_eq!(
            grid_coordinates.len(),
            self.grid_dims.len(),
            "grid coordinate rank mismatch"
        );
        let mut base = Vec::with_capacity(self.grid_dims.len());
        let mut frac = Vec::with_capacity(self.grid_dims.len());
        for (&coordinate, &dim) in grid_coordinates.iter().zip(self.grid_dims.iter()) {
            let clamped = coordinate.clamp(0.0, (dim - 1) as f64);
            let floor = clamped.floor();
            base.push(floor as usize);
            frac.push(clamped - floor);
        }
        GridPosition {
            grid: self,
            base,
            frac,
        }
    }
}

/// Resolved grid position: floor cell indices plus interpolation weights.
struct GridPosition<'a> {
    grid: &'a LutGrid,
    base: Vec<usize>,
    frac: Vec<f64>,
}

impl GridPosition<'_> {
    /// Interpolated table entry `k`, blended over the 2^D surrounding cells.
    fn entry(&self, k: usize) -> f64 {
        let d = self.base.len();
        let mut acc = 0.0;
        for corner in 0..(1usize << d) {
            let mut weight = 1.0;
            let mut flat = 0usize;
            for axis in 0..d {
                let dim = self.grid.grid_dims[axis];
                let hi = (corner >> axis) & 1 == 1;
                let index = if hi {
                    (self.base[axis] + 1).min(dim - 1)
                } else {
                    self.base[axis]
                };
                weight *= if hi {
                    self.frac[axis]
                } else {
                    1.0 - self.frac[axis]
                };
                flat = flat * dim + index;
            }
            if weight != 0.0 {
                acc += weight * self.grid.data[flat * self.grid.table_len + k];
            }
        }
        acc
    }
}
