//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::DensityConfig;
use crate::services::SnapshotCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot cache in front of the configured taxi source
    pub cache: SnapshotCache,
    /// Effective configuration, fixed for the lifetime of the server
    pub config: Arc<DensityConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(cache: SnapshotCache, config: DensityConfig) -> Self {
        Self {
            cache,
            config: Arc::new(config),
        }
    }
}
