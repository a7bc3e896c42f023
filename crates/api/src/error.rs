use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tasklog_core::error::CoreError;

use crate::auth::AuthError;

/// Body sent in place of internal error details.
pub const INTERNAL_ERROR_BODY: &str = "internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Responses carry a plain-text body; 401 responses carry none.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tasklog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::Unauthorized => {
                AppError::Core(CoreError::Unauthorized)
            }
            AuthError::Signing(e) => AppError::InternalError(format!("Token signing failed: {e}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(CoreError::Validation(msg)) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            AppError::Core(CoreError::Unauthorized) => StatusCode::UNAUTHORIZED.into_response(),
            AppError::Core(CoreError::MissingReference(msg)) => {
                tracing::error!(error = %msg, "Task references unknown reference data");
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal_error()
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error()
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}
