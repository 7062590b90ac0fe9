//! REST API over the density services.
//!
//! Handlers stay thin: they pull the snapshot through the [`SnapshotCache`],
//! hand it to the service layer and map errors through [`error::AppError`].
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/health` | [`handlers::health_check`] |
//! | GET | `/v1/density` | [`handlers::get_density`] |
//! | GET | `/v1/density/overlay` | [`handlers::get_overlay`] |
//! | POST | `/v1/density/refresh` | [`handlers::refresh_density`] |
//! | POST | `/v1/density/aggregate` | [`handlers::aggregate_points`] |
//! | GET | `/v1/config` | [`handlers::get_config`] |
//!
//! [`SnapshotCache`]: crate::services::SnapshotCache

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
