//! Mapping of service and source failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::DensityError;
use crate::services::RefreshError;
use crate::source::SourceError;

/// JSON error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable code, e.g. `INVALID_COORDINATE`
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Handler error.
#[derive(Debug)]
pub enum AppError {
    /// Invalid grid, rules or coordinates in the request or configuration
    Density(DensityError),
    /// The taxi source could not be reached or decoded
    Upstream(SourceError),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Density(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ApiError {
        match self {
            AppError::Density(e) => ApiError {
                code: e.code().to_string(),
                message: e.to_string(),
                details: None,
            },
            AppError::Upstream(e) => ApiError {
                code: "UPSTREAM_ERROR".to_string(),
                message: "Taxi data source unavailable".to_string(),
                details: Some(e.to_string()),
            },
            AppError::Internal(msg) => ApiError {
                code: "INTERNAL_ERROR".to_string(),
                message: msg.clone(),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(msg) = &self {
            tracing::error!("Internal error: {}", msg);
        }
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<DensityError> for AppError {
    fn from(err: DensityError) -> Self {
        AppError::Density(err)
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Upstream(err)
    }
}

impl From<RefreshError> for AppError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Density(e) => AppError::Density(e),
            RefreshError::Source(e) => AppError::Upstream(e),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
