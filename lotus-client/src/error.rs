//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (401 after the refresh attempt)
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected by server-side validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other server-reported error
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session store I/O
    #[error("Session store error: {0}")]
    Session(#[from] std::io::Error),
}

impl ClientError {
    /// Message suitable for an inline banner; server-reported messages
    /// come through verbatim, transport failures map to the fallback.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Unauthorized(msg)
            | ClientError::Forbidden(msg)
            | ClientError::NotFound(msg)
            | ClientError::Validation(msg) => msg.clone(),
            ClientError::Api { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
