//! Error types for grid aggregation and classification.
//!
//! Every failure is a local validation failure raised at the point where the
//! invalid input is first seen. Nothing here is retryable.

/// Result type for density operations
pub type DensityResult<T> = Result<T, DensityError>;

/// Error type for density operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DensityError {
    /// Grid or threshold configuration is unusable (non-positive cell size,
    /// unordered or negative threshold bounds).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A point is outside the valid latitude/longitude range or is not finite.
    #[error("Invalid coordinate: latitude={latitude}, longitude={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

impl DensityError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn invalid_coordinate(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinate {
            latitude,
            longitude,
        }
    }

    /// Stable machine-readable code, used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidCoordinate { .. } => "INVALID_COORDINATE",
        }
    }
}
