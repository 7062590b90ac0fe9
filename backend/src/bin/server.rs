//! Taxi density HTTP server binary.
//!
//! Loads configuration, builds the taxi source and snapshot cache, and serves
//! the REST API.
//!
//! # Usage
//!
//! ```bash
//! # Live API with defaults
//! cargo run --bin taxi-density-server
//!
//! # Replay a saved GeoJSON response
//! TAXI_SOURCE=file TAXI_FILE_PATH=snapshot.geojson cargo run --bin taxi-density-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log filter directives (default: info)
//! - `DENSITY_CONFIG` and the overrides documented on `DensityConfig::load`

use std::env;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use taxi_density::config::DensityConfig;
use taxi_density::http::{create_router, AppState};
use taxi_density::services::SnapshotCache;
use taxi_density::source::SourceFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting taxi density server");

    let config = DensityConfig::load()?;
    info!(
        "Grid origin ({}, {}), cell size {} deg, {} threshold rules, highlight > {}",
        config.grid.min_lat,
        config.grid.min_lon,
        config.grid.cell_size,
        config.rules.len(),
        config.highlight_threshold
    );

    let source = SourceFactory::create(&config.source)?;
    let cache = SnapshotCache::new(source, config.cache_ttl());
    info!("Snapshot cache ready (ttl {}s)", config.cache.ttl_secs);

    let state = AppState::new(cache, config);
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
