use serde::{Deserialize, Serialize};

use crate::error::{DensityError, DensityResult};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A single taxi position in (latitude, longitude) order.
///
/// Upstream GeoJSON delivers `[longitude, latitude]`; callers must swap before
/// building a `Coordinate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a validated coordinate.
    pub fn new(latitude: f64, longitude: f64) -> DensityResult<Self> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Check range and finiteness. NaN and infinities are out of range.
    pub fn validate(&self) -> DensityResult<()> {
        let lat_ok = (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude);
        let lon_ok = (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(DensityError::invalid_coordinate(
                self.latitude,
                self.longitude,
            ))
        }
    }

    /// Build from a GeoJSON position, which is `[longitude, latitude]`.
    pub fn from_lon_lat(longitude: f64, latitude: f64) -> DensityResult<Self> {
        Self::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let c = Coordinate::new(1.3521, 103.8198).unwrap();
        assert_eq!(c.latitude, 1.3521);
        assert_eq!(c.longitude, 103.8198);
    }

    #[test]
    fn test_range_edges_are_valid() {
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_latitude() {
        let err = Coordinate::new(999.0, 103.8).unwrap_err();
        assert!(matches!(err, DensityError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_out_of_range_longitude() {
        assert!(Coordinate::new(1.3, -180.5).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Coordinate::new(f64::NAN, 103.8).is_err());
        assert!(Coordinate::new(1.3, f64::NAN).is_err());
        assert!(Coordinate::new(f64::INFINITY, 103.8).is_err());
        assert!(Coordinate::new(1.3, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_from_lon_lat_swaps_order() {
        let c = Coordinate::from_lon_lat(103.8198, 1.3521).unwrap();
        assert_eq!(c.latitude, 1.3521);
        assert_eq!(c.longitude, 103.8198);
    }

    #[test]
    fn test_deserialize_unvalidated() {
        let c: Coordinate =
            serde_json::from_str(r#"{"latitude": 999.0, "longitude": 1.0}"#).unwrap();
        assert!(c.validate().is_err());
    }
}
