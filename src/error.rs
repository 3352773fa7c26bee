use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`StoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A domain-level error from the store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed or missing request fields.
    #[error("{0}")]
    Validation(String),

    /// No session cookie, or the session is unknown or expired.
    #[error("{0}")]
    Unauthenticated(String),

    /// The payment provider failed; its message is passed through.
    #[error("{0}")]
    Upstream(String),

    /// Generic fallback for unexpected failures.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Store(store) => match store {
                StoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", store.to_string())
                }
                StoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                StoreError::InsufficientSlots { .. } => (
                    StatusCode::BAD_REQUEST,
                    "INSUFFICIENT_SLOTS",
                    "Not enough slots available".to_string(),
                ),
            },
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
            }
            ApiError::Upstream(msg) => {
                tracing::error!(error = %msg, "payment provider error");
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", msg.clone())
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
