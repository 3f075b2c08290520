/**
 * API Error Types
 *
 * One enum covers every way a request can fail. Handlers and repositories
 * return `ApiError`; the single `IntoResponse` impl in `conversion` turns it
 * into the response envelope, so no handler builds error JSON by hand and
 * no storage-layer detail ever reaches a client.
 *
 * # Status mapping
 *
 * - `Validation`, `Conflict`, `InvalidCredentials` - 400
 * - `Unauthorized` (missing/malformed/expired token — indistinguishable) - 401
 * - `Forbidden` (authenticated, not permitted) - 403
 * - `NotFound` (unknown id; malformed ids are treated the same) - 404
 * - `Database`, `Internal` - 500, logged server-side, opaque to the client
 */

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation failure, returned in the envelope's
/// `data` array for 400 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The primary error type for all request handling.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input, with per-field detail.
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    /// Duplicate unique key (e.g. an already-registered email).
    #[error("{0}")]
    Conflict(String),

    /// Unknown email or wrong password. One message for both, so a caller
    /// cannot probe which part was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No token, or a token that failed verification for any reason.
    #[error("Not authorized")]
    Unauthorized,

    /// Valid identity, insufficient privilege (ownership or role).
    #[error("{0}")]
    Forbidden(String),

    /// Unknown resource id. Holds the resource name ("Post", "Comment", ...).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Storage failure. Never shown to the client.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else unexpected. Never shown to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Single-field validation shortcut.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        ApiError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// True when a sqlx error is a unique-constraint violation — the losing
/// writer of a duplicate-email race gets a 400 conflict, not a 500.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
