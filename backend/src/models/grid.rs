use serde::{Deserialize, Serialize};

use crate::error::{DensityError, DensityResult};

/// Uniform grid anchored at `(min_lat, min_lon)`.
///
/// The grid is conceptually infinite: the origin only fixes where cell
/// boundaries fall, it does not clip anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub min_lat: f64,
    pub min_lon: f64,
    /// Edge length of a cell in degrees
    pub cell_size: f64,
}

impl GridConfig {
    pub fn new(min_lat: f64, min_lon: f64, cell_size: f64) -> DensityResult<Self> {
        let grid = Self {
            min_lat,
            min_lon,
            cell_size,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> DensityResult<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(DensityError::invalid_config(format!(
                "cell_size must be a positive finite number of degrees, got {}",
                self.cell_size
            )));
        }
        if !self.min_lat.is_finite() || !self.min_lon.is_finite() {
            return Err(DensityError::invalid_config(format!(
                "grid origin must be finite, got ({}, {})",
                self.min_lat, self.min_lon
            )));
        }
        Ok(())
    }
}

/// Discrete cell identifier. Ordering is `(row, col)` ascending, which is the
/// iteration order of every cell collection in the crate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellId {
    pub row: i64,
    pub col: i64,
}

/// South-west and north-east corners of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl CellId {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Geographic extent of this cell on `grid`.
    pub fn bounds(&self, grid: &GridConfig) -> CellBounds {
        let south = grid.min_lat + self.row as f64 * grid.cell_size;
        let west = grid.min_lon + self.col as f64 * grid.cell_size;
        CellBounds {
            south,
            west,
            north: south + grid.cell_size,
            east: west + grid.cell_size,
        }
    }

    /// Cell center as `(latitude, longitude)`.
    pub fn center(&self, grid: &GridConfig) -> (f64, f64) {
        let b = self.bounds(grid);
        (b.south + grid.cell_size / 2.0, b.west + grid.cell_size / 2.0)
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
