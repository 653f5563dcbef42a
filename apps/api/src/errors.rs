#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure taxonomy for one reasoning round trip. The two kinds are kept
/// distinct for logging and diagnostics even though the user-facing fallback
/// path treats them identically.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The remote call could not complete (network, auth, quota, HTTP error,
    /// empty response).
    #[error("reasoning service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The remote call succeeded but the returned text is not valid JSON or
    /// does not match the declared response shape.
    #[error("malformed reasoning response: {0}")]
    MalformedResponse(String),
}

impl From<LlmError> for RequestError {
    fn from(err: LlmError) -> Self {
        RequestError::ServiceUnavailable(err.to_string())
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Reasoning error: {0}")]
    Reasoning(#[from] RequestError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Reasoning(e) => {
                tracing::error!("Reasoning error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REASONING_ERROR",
                    "The eligibility reasoning service could not complete the request".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
