//! Error types for the benchmark node
//!
//! Provides unified error handling using thiserror. None of these are retried:
//! a retry would distort the timings being measured.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Bench Error Enum ==
/// Unified error type for the benchmark node.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Record absent from the store when it was read
    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    /// Peer node failed, timed out or returned no usable result
    #[error("Remote benchmark unavailable: {0}")]
    RemoteBenchmarkUnavailable(String),

    /// Mode value outside NO_CACHE / SECOND_LEVEL_CACHE / DISTRIBUTED_MAP
    #[error("Unsupported mode: {0}")]
    UnsupportedMode(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Peer member owning a distributed map partition could not be reached
    #[error("Cluster member unavailable: {0}")]
    ClusterUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BenchError {
    pub fn status(&self) -> StatusCode {
        match self {
            BenchError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            BenchError::UnsupportedMode(_) | BenchError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            BenchError::RemoteBenchmarkUnavailable(_) | BenchError::ClusterUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            BenchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for BenchError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the benchmark node.
pub type Result<T> = std::result::Result<T, BenchError>;
