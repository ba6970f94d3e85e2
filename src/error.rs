use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::cipher::CipherError;

/// Application-wide error types with appropriate HTTP status codes.
///
/// Request errors render as a single plain-text line terminated by `\n`,
/// which is what clients match on. They are always raised before any
/// response bytes are streamed.
///
/// # Client Errors
///
/// - `NotFound` - unknown cipher resource (404)
/// - `BadRequest` - missing or malformed query parameter (400)
/// - `InvalidKey` - key rejected by the cipher engine (400)
/// - `NotImplemented` - recognised but unsupported mode or method (501)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    InvalidKey(#[from] CipherError),

    #[error("{0}")]
    NotImplemented(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::ConfigError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            // Never expose internal details to clients
            AppError::ConfigError(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                "internal server error".to_string()
            }
            _ => {
                tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
                self.to_string()
            }
        };

        (status, format!("{message}\n")).into_response()
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
