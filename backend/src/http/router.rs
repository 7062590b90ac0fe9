//! Route table and middleware stack.
//!
//! Everything except `/health` lives under `/v1`.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Upper bound for ad-hoc aggregation payloads.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the density API router over `state`.
pub fn create_router(state: AppState) -> Router {
    // The dashboard frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/density", get(handlers::get_density))
        .route("/density/overlay", get(handlers::get_overlay))
        .route("/density/refresh", post(handlers::refresh_density))
        .route("/density/aggregate", post(handlers::aggregate_points))
        .route("/config", get(handlers::get_config));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
