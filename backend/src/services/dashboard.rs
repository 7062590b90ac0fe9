//! One dashboard refresh: snapshot from the cache, report from the core.
//!
//! A failed fetch does not skip the core. The core is called with an empty
//! point list and the view is marked unavailable, so the client always gets a
//! well-formed report.

use chrono::{DateTime, FixedOffset, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use super::overlay::{build_overlay, MapOverlay, OverlayStyle};
use super::report::build_report;
use super::snapshot_cache::{CachedSnapshot, SnapshotCache};
use crate::config::DensityConfig;
use crate::error::{DensityError, DensityResult};
use crate::models::AggregationReport;
use crate::source::SourceError;

/// Failure of an explicit refresh.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Density(#[from] DensityError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Report plus the pass-through snapshot metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityView {
    /// `false` when no snapshot could be obtained
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub taxi_count: u64,
    pub fetched_at: Option<DateTime<Utc>>,
    pub cached: bool,
    pub report: AggregationReport,
}

/// A density view with its map overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayView {
    #[serde(flatten)]
    pub density: DensityView,
    pub overlay: MapOverlay,
}

/// Build the current density view.
///
/// Only configuration errors are returned; source failures degrade to an
/// empty, unavailable view.
pub async fn get_density_view(
    cache: &SnapshotCache,
    config: &DensityConfig,
) -> DensityResult<DensityView> {
    density_view_from(cache.get().await, config)
}

/// Drop the cached snapshot and build the view from a fresh fetch.
///
/// Unlike [`get_density_view`] a source failure is returned, not folded into
/// an unavailable view.
pub async fn refresh_density_view(
    cache: &SnapshotCache,
    config: &DensityConfig,
) -> Result<DensityView, RefreshError> {
    let fetched = cache.refresh().await?;
    Ok(density_view_from(Ok(fetched), config)?)
}

/// Build the current density view together with its overlay.
pub async fn get_overlay_view(
    cache: &SnapshotCache,
    config: &DensityConfig,
    style: Option<OverlayStyle>,
) -> DensityResult<OverlayView> {
    let density = get_density_view(cache, config).await?;
    let overlay = build_overlay(
        &density.report,
        &config.grid,
        &config.rules,
        &config.overlay_options(style),
    );
    Ok(OverlayView { density, overlay })
}

/// Turn a fetch outcome into a view.
fn density_view_from(
    fetched: Result<CachedSnapshot, SourceError>,
    config: &DensityConfig,
) -> DensityResult<DensityView> {
    match fetched {
        Ok(cached) => {
            let report = build_report(
                &cached.snapshot.coordinates,
                &config.grid,
                &config.rules,
                config.highlight_threshold,
            )?;
            Ok(DensityView {
                available: true,
                error: None,
                timestamp: cached.snapshot.timestamp,
                taxi_count: cached.snapshot.taxi_count,
                fetched_at: Some(cached.fetched_at),
                cached: cached.from_cache,
                report,
            })
        }
        Err(err) => {
            warn!("No taxi data available: {}", err);
            let report = build_report(&[], &config.grid, &config.rules, config.highlight_threshold)?;
            Ok(DensityView {
                available: false,
                error: Some(err.to_string()),
                timestamp: None,
                taxi_count: 0,
                fetched_at: None,
                cached: false,
                report,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DensityError;
    use crate::models::Coordinate;
    use crate::source::{StaticTaxiSource, TaxiSnapshot};
    use std::sync::Arc;
    use std::time::Duration;

    fn snapshot() -> TaxiSnapshot {
        TaxiSnapshot {
            timestamp: Some(
                DateTime::parse_from_rfc3339("2024-05-01T12:00:00+08:00").unwrap(),
            ),
            taxi_count: 30,
            coordinates: vec![Coordinate::new(1.3521, 103.8198).unwrap(); 30],
        }
    }

    fn cache(source: StaticTaxiSource) -> SnapshotCache {
        SnapshotCache::new(Arc::new(source), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_view_with_data() {
        let cache = cache(StaticTaxiSource::new(snapshot()));
        let view = get_density_view(&cache, &DensityConfig::default())
            .await
            .unwrap();

        assert!(view.available);
        assert!(view.error.is_none());
        assert_eq!(view.taxi_count, 30);
        assert!(view.timestamp.is_some());
        assert!(view.fetched_at.is_some());
        assert!(!view.cached);
        assert_eq!(view.report.total_points, 30);
        assert_eq!(view.report.cells.len(), 1);
        assert_eq!(view.report.highlighted.len(), 1);
    }

    #[tokio::test]
    async fn test_second_view_is_cached() {
        let cache = cache(StaticTaxiSource::new(snapshot()));
        let config = DensityConfig::default();
        get_density_view(&cache, &config).await.unwrap();
        let view = get_density_view(&cache, &config).await.unwrap();
        assert!(view.cached);
    }

    #[tokio::test]
    async fn test_source_failure_gives_empty_report() {
        let cache = cache(StaticTaxiSource::failing("connection refused"));
        let view = get_density_view(&cache, &DensityConfig::default())
            .await
            .unwrap();

        assert!(!view.available);
        assert!(view.error.unwrap().contains("connection refused"));
        assert_eq!(view.report.total_points, 0);
        assert!(view.report.cells.is_empty());
        assert_eq!(view.report.highlight_threshold, 25);
    }

    #[tokio::test]
    async fn test_bad_config_is_an_error_even_without_data() {
        let cache = cache(StaticTaxiSource::failing("down"));
        let mut config = DensityConfig::default();
        config.grid.cell_size = -1.0;

        let err = get_density_view(&cache, &config).await.unwrap_err();
        assert!(matches!(err, DensityError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_overlay_view() {
        let cache = cache(StaticTaxiSource::new(snapshot()));
        let view = get_overlay_view(&cache, &DensityConfig::default(), Some(OverlayStyle::RectanglesOnly))
            .await
            .unwrap();

        assert_eq!(view.overlay.rectangles.len(), 1);
        assert!(view.overlay.markers.is_empty());
        assert_eq!(view.density.report.total_points, 30);
    }

    #[tokio::test]
    async fn test_refresh_view_is_not_cached() {
        let cache = cache(StaticTaxiSource::new(snapshot()));
        let config = DensityConfig::default();
        get_density_view(&cache, &config).await.unwrap();
        let view = refresh_density_view(&cache, &config).await.unwrap();
        assert!(!view.cached);
    }

    #[tokio::test]
    async fn test_refresh_failure_is_returned() {
        let cache = cache(StaticTaxiSource::failing("dns failure"));
        let err = refresh_density_view(&cache, &DensityConfig::default())
            .await
            .unwrap_err();

        match err {
            RefreshError::Source(e) => assert!(e.to_string().contains("dns failure")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_with_bad_config() {
        let cache = cache(StaticTaxiSource::new(snapshot()));
        let mut config = DensityConfig::default();
        config.grid.cell_size = 0.0;

        let err = refresh_density_view(&cache, &config).await.unwrap_err();
        assert!(matches!(err, RefreshError::Density(DensityError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_unavailable_view_keeps_source_message() {
        let cache = cache(StaticTaxiSource::failing("upstream 503"));
        let view = get_density_view(&cache, &DensityConfig::default())
            .await
            .unwrap();
        assert_eq!(view.error.as_deref(), Some("Source unavailable: upstream 503"));
    }
}
