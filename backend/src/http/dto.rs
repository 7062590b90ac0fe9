//! Data Transfer Objects for the HTTP API.
//!
//! Report, view and overlay types already derive Serialize/Deserialize and are
//! re-exported as-is.

use serde::{Deserialize, Serialize};

pub use crate::models::{AggregationReport, CellDensity, Coordinate, GridConfig, ThresholdRule};
pub use crate::services::{DensityView, MapOverlay, OverlayStyle, OverlayView};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Name of the configured taxi source
    pub source: String,
    pub cache_ttl_secs: u64,
}

/// Query parameters for the overlay endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlayQuery {
    /// Overlay style; the configured default when omitted
    #[serde(default)]
    pub style: Option<OverlayStyle>,
}

/// Request body for ad-hoc aggregation of caller-supplied points.
///
/// Fields left out fall back to the server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRequest {
    /// Points in (latitude, longitude) order
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub grid: Option<GridConfig>,
    #[serde(default)]
    pub rules: Option<Vec<ThresholdRule>>,
    #[serde(default)]
    pub highlight_threshold: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_request_minimal() {
        let req: AggregateRequest = serde_json::from_str(
            r#"{"coordinates": [{"latitude": 1.3, "longitude": 103.8}]}"#,
        )
        .unwrap();
        assert_eq!(req.coordinates.len(), 1);
        assert!(req.grid.is_none());
        assert!(req.rules.is_none());
        assert!(req.highlight_threshold.is_none());
    }

    #[test]
    fn test_overlay_query_style() {
        let q: OverlayQuery = serde_json::from_str(r#"{"style": "rectangles_only"}"#).unwrap();
        assert_eq!(q.style, Some(OverlayStyle::RectanglesOnly));
        let q: OverlayQuery = serde_json::from_str("{}").unwrap();
        assert!(q.style.is_none());
    }
}
