//! Taxi position sources.
//!
//! A source produces one [`TaxiSnapshot`] per call. Coordinates in a snapshot
//! are already in `(latitude, longitude)` order and validated; the upstream
//! timestamp and taxi count are carried along untouched for display.
//!
//! Implementations:
//! - [`HttpTaxiSource`]: the public taxi-availability API (GeoJSON over HTTPS)
//! - [`FileTaxiSource`]: the same GeoJSON payload read from disk
//! - [`StaticTaxiSource`]: fixed snapshot or fixed failure, for tests and offline runs

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DensityError;
use crate::models::Coordinate;

pub mod factory;
pub mod file;
pub mod geojson;
pub mod http;
pub mod static_source;

pub use factory::SourceFactory;
pub use file::FileTaxiSource;
pub use geojson::decode_feature_collection;
pub use http::HttpTaxiSource;
pub use static_source::StaticTaxiSource;

/// Public endpoint for Singapore taxi availability.
pub const DEFAULT_TAXI_API_URL: &str = "https://api.data.gov.sg/v1/transport/taxi-availability";

/// One decoded upstream response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxiSnapshot {
    /// Upstream capture time, if the payload carried one
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// Upstream-reported number of available taxis
    pub taxi_count: u64,
    pub coordinates: Vec<Coordinate>,
}

impl TaxiSnapshot {
    /// Snapshot with no points, used when the upstream has no features.
    pub fn empty() -> Self {
        Self {
            timestamp: None,
            taxi_count: 0,
            coordinates: Vec::new(),
        }
    }
}

/// Error type for snapshot sources
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode taxi payload: {0}")]
    Decode(String),

    #[error("Upstream payload contains an unusable point: {0}")]
    Coordinate(#[from] DensityError),

    #[error("Failed to read taxi payload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can produce a taxi snapshot.
#[async_trait]
pub trait TaxiSource: Send + Sync {
    /// Fetch the current snapshot.
    async fn fetch(&self) -> Result<TaxiSnapshot, SourceError>;

    /// Short human-readable name, shown in health output and logs.
    fn name(&self) -> &str;
}

/// Source kind selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Live HTTP API
    Http,
    /// GeoJSON file on disk
    File,
    /// Always-empty snapshot
    Static,
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "api" => Ok(Self::Http),
            "file" => Ok(Self::File),
            "static" | "offline" => Ok(Self::Static),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}
