// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::password::{HashError, LoginError};
use crate::store::StoreError;
use crate::validate::ValidationFailure;

/// HTTP API error with appropriate status codes and client-facing bodies.
///
/// Validation and auth failures carry structured bodies the client can act
/// on; everything else is logged server-side and reduced to an opaque 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", .0.message)]
    Validation(ValidationFailure),

    /// Credential rejection during password login.
    #[error("{0}")]
    LoginRejected(&'static str),

    /// Bearer token missing, malformed, expired, or badly signed.
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("user id and params id do not match")]
    IdMismatch,

    #[error("{0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Validation(failure) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(failure)).into_response()
            }
            ApiError::LoginRejected(message) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "code": 401, "reason": "LoginError", "message": message })),
            )
                .into_response(),
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "code": 401, "reason": "AuthError", "message": message })),
            )
                .into_response(),
            ApiError::IdMismatch => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "user id and params id do not match" })),
            )
                .into_response(),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response()
            }
            ApiError::Internal(detail) => {
                // Log the real error but return a generic message.
                tracing::error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(failure: ValidationFailure) -> Self {
        ApiError::Validation(failure)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::Rejected(message) => ApiError::LoginRejected(message),
            LoginError::Store(e) => ApiError::Internal(e.to_string()),
            LoginError::Hash(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<HashError> for ApiError {
    fn from(err: HashError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
