//! Error classification for backend calls.

use thiserror::Error;

use crate::phase::ErrorCode;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// No response was received (connect error, timeout, broken body).
    #[error("Request to '{path}' failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status and no error code.
    #[error("Request to '{path}' returned status {status}")]
    Status { path: String, status: u16 },

    /// The server reported an error or validation failure in the body.
    #[error("Server rejected '{path}': {code}")]
    Application { path: String, code: String },

    /// The body did not have the expected shape.
    #[error("Unexpected response from '{path}': {message}")]
    Decode { path: String, message: String },

    /// The call needs a logged-in user.
    #[error("No user is logged in")]
    NotAuthenticated,
}

impl ApiError {
    /// Error code surfaced through the slice phase.
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Client(_) | ApiError::Transport { .. } | ApiError::Status { .. } => {
                ErrorCode::Api
            }
            ApiError::Application { code, .. } => ErrorCode::Server(code.clone()),
            ApiError::Decode { .. } => ErrorCode::InvalidResponse,
            ApiError::NotAuthenticated => ErrorCode::NotAuthenticated,
        }
    }

    /// Short type string for structured logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Client(_) => "client_error",
            ApiError::Transport { .. } => "transport_error",
            ApiError::Status { .. } => "status_error",
            ApiError::Application { .. } => "application_error",
            ApiError::Decode { .. } => "decode_error",
            ApiError::NotAuthenticated => "not_authenticated",
        }
    }
}
