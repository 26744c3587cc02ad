use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use clientes_core::DomainError;

pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas.";
pub const NAMES_REQUIRED: &str = "Nome e Sobrenome são obrigatórios.";

/// Failures surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login with an unknown username/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired or foreign bearer token.
    #[error("unauthorized")]
    Unauthorized,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(_) => Self::Validation(NAMES_REQUIRED.to_string()),
            DomainError::InvalidId(_) => Self::NotFound,
        }
    }
}

/// Unreadable request bodies (bad JSON, wrong field types, missing
/// `Content-Type: application/json`) are client errors like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidCredentials => json_error(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
            )
                .into_response(),
            ApiError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}
