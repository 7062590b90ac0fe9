//! Decoding of the taxi-availability GeoJSON payload.
//!
//! The payload is a FeatureCollection whose first Feature carries a MultiPoint
//! of `[longitude, latitude]` positions and `timestamp` / `taxi_count`
//! properties. This is the only place in the crate that swaps GeoJSON order
//! into `(latitude, longitude)`.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::{SourceError, TaxiSnapshot};
use crate::models::Coordinate;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    timestamp: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    taxi_count: Option<u64>,
}

/// Decode a FeatureCollection body into a snapshot.
///
/// A collection without features decodes to [`TaxiSnapshot::empty`]. When the
/// payload omits `taxi_count` the number of decoded points is used instead.
pub fn decode_feature_collection(body: &str) -> Result<TaxiSnapshot, SourceError> {
    let collection: FeatureCollection = serde_json::from_str(body)
        .map_err(|e| SourceError::Decode(format!("Invalid FeatureCollection: {}", e)))?;

    let Some(feature) = collection.features.into_iter().next() else {
        return Ok(TaxiSnapshot::empty());
    };

    if feature.geometry.kind != "MultiPoint" {
        return Err(SourceError::Decode(format!(
            "Expected MultiPoint geometry, got {}",
            feature.geometry.kind
        )));
    }

    let coordinates = feature
        .geometry
        .coordinates
        .iter()
        .enumerate()
        .map(|(idx, position)| match position.as_slice() {
            [lon, lat, ..] => Ok(Coordinate::from_lon_lat(*lon, *lat)?),
            _ => Err(SourceError::Decode(format!(
                "Position {} has {} components, expected [longitude, latitude]",
                idx,
                position.len()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TaxiSnapshot {
        timestamp: feature.properties.timestamp,
        taxi_count: feature
            .properties
            .taxi_count
            .unwrap_or(coordinates.len() as u64),
        coordinates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "crs": {"type": "link", "properties": {"href": "http://spatialreference.org/ref/epsg/4326/ogcwkt/", "type": "ogcwkt"}},
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "MultiPoint",
                "coordinates": [[103.6185, 1.2806], [103.8198, 1.3521], [103.8198, 1.3521]]
            },
            "properties": {
                "timestamp": "2024-05-01T12:34:56+08:00",
                "taxi_count": 3,
                "api_info": {"status": "healthy"}
            }
        }]
    }"#;

    #[test]
    fn test_decode_swaps_lon_lat() {
        let snapshot = decode_feature_collection(SAMPLE).unwrap();
        assert_eq!(snapshot.coordinates.len(), 3);
        assert_eq!(snapshot.coordinates[0].latitude, 1.2806);
        assert_eq!(snapshot.coordinates[0].longitude, 103.6185);
    }

    #[test]
    fn test_decode_passes_through_properties() {
        let snapshot = decode_feature_collection(SAMPLE).unwrap();
        assert_eq!(snapshot.taxi_count, 3);
        let ts = snapshot.timestamp.unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-01T12:34:56+08:00");
    }

    #[test]
    fn test_decode_no_features() {
        let snapshot =
            decode_feature_collection(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert_eq!(snapshot, TaxiSnapshot::empty());
    }

    #[test]
    fn test_decode_missing_count_uses_point_count() {
        let body = r#"{"features": [{"geometry": {"type": "MultiPoint", "coordinates": [[103.8, 1.3]]}, "properties": {}}]}"#;
        let snapshot = decode_feature_collection(body).unwrap();
        assert_eq!(snapshot.taxi_count, 1);
        assert!(snapshot.timestamp.is_none());
    }

    #[test]
    fn test_decode_rejects_missing_features() {
        let err = decode_feature_collection(r#"{"type": "FeatureCollection"}"#).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_wrong_geometry() {
        let body = r#"{"features": [{"geometry": {"type": "Point", "coordinates": []}}]}"#;
        let err = decode_feature_collection(body).unwrap_err();
        assert!(err.to_string().contains("MultiPoint"));
    }

    #[test]
    fn test_decode_rejects_short_position() {
        let body = r#"{"features": [{"geometry": {"type": "MultiPoint", "coordinates": [[103.8]]}}]}"#;
        assert!(matches!(
            decode_feature_collection(body),
            Err(SourceError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_out_of_range_point() {
        // Latitude and longitude given in the wrong order
        let body = r#"{"features": [{"geometry": {"type": "MultiPoint", "coordinates": [[1.3, 103.8]]}}]}"#;
        assert!(matches!(
            decode_feature_collection(body),
            Err(SourceError::Coordinate(_))
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_feature_collection("not json").is_err());
    }
}
