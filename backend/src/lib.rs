//! # Taxi Density Backend
//!
//! Live taxi density dashboard engine.
//!
//! The backend polls a public taxi-availability API, buckets the reported
//! positions into a uniform latitude/longitude grid, classifies every occupied
//! cell into a density tier and serves the result, plus a renderer-neutral map
//! overlay, over a REST API via Axum.
//!
//! ## Architecture
//!
//! - [`models`]: Value types (coordinates, grid, tiers, report)
//! - [`services`]: Grid aggregation and classification core, snapshot cache,
//!   overlay description
//! - [`source`]: Taxi position sources (HTTP API, GeoJSON file, static)
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use taxi_density::models::{Coordinate, GridConfig, ThresholdRule, Tier};
//! use taxi_density::services::build_report;
//!
//! let grid = GridConfig::new(1.2, 103.6, 0.01).unwrap();
//! let rules = vec![
//!     ThresholdRule::new(21, Tier::High),
//!     ThresholdRule::new(11, Tier::Medium),
//! ];
//! let points = vec![Coordinate::new(1.3521, 103.8198).unwrap(); 5];
//!
//! let report = build_report(&points, &grid, &rules, 25).unwrap();
//! assert_eq!(report.total_points, 5);
//! assert_eq!(report.cells[0].tier, Tier::Low);
//! ```

pub mod config;

pub mod error;

pub mod models;

pub mod services;

pub mod source;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{DensityError, DensityResult};
