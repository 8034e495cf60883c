//! Application error types with consistent JSON API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// Account/profile errors propagate to the client unmodified. Gateway and
/// normalizer errors exist in the taxonomy but are swallowed inside the plan
/// generator, which substitutes fallback values instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Profile already exists for this account")]
    ProfileAlreadyExists,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Completion service unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("Completion service returned a malformed response: {0}")]
    GatewayMalformedResponse(String),

    #[error("No JSON value found in model output")]
    UnparseableResponse,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::DuplicateEmail => (StatusCode::CONFLICT, "duplicate_email", None),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
            }
            AppError::ProfileNotFound => (StatusCode::NOT_FOUND, "profile_not_found", None),
            AppError::ProfileAlreadyExists => {
                (StatusCode::CONFLICT, "profile_already_exists", None)
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::GatewayUnavailable(msg) => {
                (StatusCode::BAD_GATEWAY, "gateway_unavailable", Some(msg.clone()))
            }
            AppError::GatewayMalformedResponse(msg) => {
                (StatusCode::BAD_GATEWAY, "gateway_malformed", Some(msg.clone()))
            }
            AppError::UnparseableResponse => {
                (StatusCode::BAD_GATEWAY, "unparseable_response", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
