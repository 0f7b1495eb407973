use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::io;

/// Custom error type for push-relay operations
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Signature verification failed: {0}")]
    AuthenticationFailure(String),

    #[error("Malformed push payload: {0}")]
    MalformedPayload(String),

    #[error("Failed to start notify script: {0}")]
    SpawnFailure(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::AuthenticationFailure(_) => StatusCode::UNAUTHORIZED,
            RelayError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            RelayError::SpawnFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Helper type for Results that use RelayError
pub type Result<T> = std::result::Result<T, RelayError>;
