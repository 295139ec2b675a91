//! Error types for the trending service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Trending Error Enum ==
/// Unified error type for the trending service.
#[derive(Error, Debug)]
pub enum TrendingError {
    /// Configuration value out of range (fatal at startup)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Article or event store read/write failure
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for TrendingError {
    fn into_response(self) -> Response {
        let status = match &self {
            TrendingError::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TrendingError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            TrendingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the trending service.
pub type Result<T> = std::result::Result<T, TrendingError>;
