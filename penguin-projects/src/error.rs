//! Error types for penguin-projects

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::{ScanError, ServiceError};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Project service error
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<penguin_common::TimestampError> for ApiError {
    fn from(err: penguin_common::TimestampError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Background task failed: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Service(ref err) => match err {
                ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
                ServiceError::Scan(ScanError::PathNotFound(_)) => {
                    (StatusCode::NOT_FOUND, "PATH_NOT_FOUND", err.to_string())
                }
                ServiceError::Scan(ScanError::NotADirectory(_)) => {
                    (StatusCode::BAD_REQUEST, "NOT_A_DIRECTORY", err.to_string())
                }
                ServiceError::Scan(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SCAN_ERROR", err.to_string()),
                ServiceError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", err.to_string()),
            },
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, %message, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
