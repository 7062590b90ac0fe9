//! Per-cell occupancy counting.

use std::collections::BTreeMap;

use log::debug;

use super::grid_index::index_on;
use crate::error::DensityResult;
use crate::models::{CellId, Coordinate, GridConfig};

/// Occupancy per cell, iterated in `(row, col)` order.
pub type CellCount = BTreeMap<CellId, u64>;

/// Count the points falling in each cell of `grid`.
///
/// Points are not deduplicated: every entry is one taxi. The first invalid
/// point aborts the whole call.
pub fn aggregate(coordinates: &[Coordinate], grid: &GridConfig) -> DensityResult<CellCount> {
    grid.validate()?;

    let mut counts = CellCount::new();
    for coordinate in coordinates {
        coordinate.validate()?;
        *counts.entry(index_on(coordinate, grid)?).or_insert(0) += 1;
    }

    debug!(
        "Aggregated {} points into {} cells",
        coordinates.len(),
        counts.len()
    );
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DensityError;

    fn grid() -> GridConfig {
        GridConfig::new(1.2, 103.6, 0.01).unwrap()
    }

    fn at(lat: f64, lon: f64) -> Coordinate {
        Coordinate {
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn test_empty_input() {
        let counts = aggregate(&[], &grid()).unwrap();
        assert!(counts.is_empty());
    }

    #[test]
    fn test_duplicates_are_counted() {
        let points = vec![at(1.3521, 103.8198); 5];
        let counts = aggregate(&points, &grid()).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.values().copied().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_counts_split_across_cells() {
        let points = vec![
            at(1.205, 103.604),
            at(1.206, 103.605),
            at(1.215, 103.604),
            at(1.195, 103.604),
        ];
        let counts = aggregate(&points, &grid()).unwrap();
        assert_eq!(counts.get(&CellId::new(0, 0)), Some(&2));
        assert_eq!(counts.get(&CellId::new(1, 0)), Some(&1));
        assert_eq!(counts.get(&CellId::new(-1, 0)), Some(&1));
    }

    #[test]
    fn test_iteration_order() {
        let points = vec![at(1.215, 103.604), at(1.195, 103.624), at(1.205, 103.614)];
        let counts = aggregate(&points, &grid()).unwrap();
        let keys: Vec<CellId> = counts.keys().copied().collect();
        assert_eq!(
            keys,
            vec![CellId::new(-1, 2), CellId::new(0, 1), CellId::new(1, 0)]
        );
    }

    #[test]
    fn test_invalid_latitude_fails() {
        let points = vec![at(1.3, 103.8), at(999.0, 103.8)];
        let err = aggregate(&points, &grid()).unwrap_err();
        assert_eq!(err, DensityError::invalid_coordinate(999.0, 103.8));
    }

    #[test]
    fn test_nan_fails() {
        let err = aggregate(&[at(f64::NAN, 103.8)], &grid()).unwrap_err();
        assert!(matches!(err, DensityError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_unrepresentable_cell_fails() {
        let tiny = GridConfig::new(1.2, 103.6, 1e-20).unwrap();
        let points = vec![at(1.3, 103.7), at(1.4, 103.8)];
        assert!(matches!(
            aggregate(&points, &tiny),
            Err(DensityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_grid_fails_even_when_empty() {
        let bad = GridConfig {
            min_lat: 1.2,
            min_lon: 103.6,
            cell_size: 0.0,
        };
        assert!(matches!(
            aggregate(&[], &bad),
            Err(DensityError::InvalidConfig(_))
        ));
    }
}
