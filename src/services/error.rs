//! Errors raised while talking to the catalog API

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or timeout failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The session token was rejected or missing
    #[error("Not authorized (HTTP {0})")]
    Unauthorized(u16),

    /// Any other non-success HTTP status
    #[error("Server responded with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The background worker went away before answering
    #[error("Request worker disconnected")]
    Disconnected,
}

impl ApiError {
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized(status),
            _ => ApiError::Status {
                status,
                message: body.chars().take(200).collect(),
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}
