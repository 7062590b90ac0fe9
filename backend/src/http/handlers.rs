//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for the actual work.

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{AggregateRequest, HealthResponse, OverlayQuery};
use super::error::AppError;
use super::state::AppState;
use crate::config::DensityConfig;
use crate::models::AggregationReport;
use crate::services::{self, DensityView, OverlayView};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint. Does not contact the taxi source.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        source: state.cache.source_name().to_string(),
        cache_ttl_secs: state.cache.ttl().as_secs(),
    }))
}

// =============================================================================
// Density Endpoints
// =============================================================================

/// GET /v1/density
///
/// Current density report. When the source is down the report is empty and
/// `available` is false.
pub async fn get_density(State(state): State<AppState>) -> HandlerResult<DensityView> {
    let view = services::get_density_view(&state.cache, &state.config).await?;
    Ok(Json(view))
}

/// GET /v1/density/overlay?style=rectangles_and_markers|rectangles_only
///
/// Current density report with map layers.
pub async fn get_overlay(
    State(state): State<AppState>,
    Query(query): Query<OverlayQuery>,
) -> HandlerResult<OverlayView> {
    let view = services::get_overlay_view(&state.cache, &state.config, query.style).await?;
    Ok(Json(view))
}

/// POST /v1/density/refresh
///
/// Drop the cached snapshot and fetch a new one. Unlike the read endpoints a
/// source failure is reported as an error here.
pub async fn refresh_density(State(state): State<AppState>) -> HandlerResult<DensityView> {
    let view = services::refresh_density_view(&state.cache, &state.config).await?;
    tracing::info!(
        "Refreshed snapshot: {} points, {} cells",
        view.report.total_points,
        view.report.cells.len()
    );
    Ok(Json(view))
}

/// POST /v1/density/aggregate
///
/// Aggregate caller-supplied points without touching the taxi source.
pub async fn aggregate_points(
    State(state): State<AppState>,
    Json(request): Json<AggregateRequest>,
) -> HandlerResult<AggregationReport> {
    let grid = request.grid.unwrap_or(state.config.grid);
    let rules = request.rules.unwrap_or_else(|| state.config.rules.clone());
    let highlight_threshold = request
        .highlight_threshold
        .unwrap_or(state.config.highlight_threshold);

    // Large point lists are CPU work; keep them off the async workers
    let report = tokio::task::spawn_blocking(move || {
        services::build_report(&request.coordinates, &grid, &rules, highlight_threshold)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(report))
}

// =============================================================================
// Configuration
// =============================================================================

/// GET /v1/config
///
/// Effective configuration.
pub async fn get_config(State(state): State<AppState>) -> HandlerResult<DensityConfig> {
    Ok(Json(state.config.as_ref().clone()))
}
