//! Unified error handling
//!
//! Every handler returns [`AppResult`]. Failures serialize to the wire
//! envelope the dashboard expects:
//!
//! ```json
//! { "success": false, "error": "Order 42 not found" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::db::repository::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing resource (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad input (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database failure (500) - message is surfaced to the caller
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else (500) - message is NOT surfaced
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            success: false,
            error: message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}
