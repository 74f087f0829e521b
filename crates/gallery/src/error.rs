use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use v3_core::error::CoreError;
use v3_store::StoreError;

use crate::gallery::render::render_error;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for failures
/// talking to the external platform. Implements [`IntoResponse`] to produce
/// consistent JSON error responses. Every body also carries an `html` field
/// with the gallery error fragment, so the page can show it in place of the
/// gallery without building markup itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `v3_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The document store or a remote procedure failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Domain errors ---
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // --- Platform errors ---
            AppError::Store(err) => classify_store_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
            "html": render_error(&message),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - A procedure that ran and rejected the call keeps its message and maps
///   to 502 with code `PROCEDURE_ERROR`.
/// - Anything else about reaching the platform maps to 502 `UPSTREAM_ERROR`.
/// - Local credential problems map to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Procedure { .. } => {
            tracing::warn!(error = %err, "Remote procedure failed");
            (StatusCode::BAD_GATEWAY, "PROCEDURE_ERROR", err.user_message())
        }
        StoreError::Credential(_) => {
            tracing::error!(error = %err, "Credential error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Upstream error");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", other.to_string())
        }
    }
}
