//! Coordinate to cell mapping.

use crate::error::{DensityError, DensityResult};
use crate::models::{CellId, Coordinate, GridConfig};

/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
const INDEX_RANGE: std::ops::Range<f64> = (i64::MIN as f64)..(i64::MAX as f64);

/// Map `coordinate` onto `grid`.
///
/// Uses `floor`, so a point south or west of the origin lands in a negative
/// row/column instead of being folded into cell 0. Fails with
/// `InvalidConfig` when the cell index does not fit in an `i64`, which only
/// happens for a vanishingly small `cell_size` or a far-away origin.
pub fn cell_of(coordinate: &Coordinate, grid: &GridConfig) -> DensityResult<CellId> {
    grid.validate()?;
    index_on(coordinate, grid)
}

/// Same as [`cell_of`] for a grid the caller has already validated.
pub(crate) fn index_on(coordinate: &Coordinate, grid: &GridConfig) -> DensityResult<CellId> {
    let row = axis_index(coordinate.latitude - grid.min_lat, grid)?;
    let col = axis_index(coordinate.longitude - grid.min_lon, grid)?;
    Ok(CellId::new(row, col))
}

fn axis_index(offset: f64, grid: &GridConfig) -> DensityResult<i64> {
    let index = (offset / grid.cell_size).floor();
    if !INDEX_RANGE.contains(&index) {
        return Err(DensityError::invalid_config(format!(
            "cell_size {} is too small: cell index {} does not fit the grid",
            grid.cell_size, index
        )));
    }
    Ok(index as i64)
}
