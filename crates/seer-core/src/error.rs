//! Error Types

use thiserror::Error;

/// Result type alias for reading operations
pub type Result<T> = std::result::Result<T, SeerError>;

/// Reading pipeline error types
#[derive(Error, Debug)]
pub enum SeerError {
    /// Completion service returned an error
    #[error("Completion error: {0}")]
    Completion(String),

    /// Completion service unavailable or not responding
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),

    /// Completion call exceeded the configured timeout
    #[error("Completion timed out after {0}s")]
    Timeout(u64),

    /// Authentication failed (missing or invalid API key)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The service answered but returned no usable choice
    #[error("Empty completion: {0}")]
    EmptyCompletion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl SeerError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            SeerError::Completion(_) | SeerError::EmptyCompletion(_) => {
                "The reading service encountered an error. Please try again.".into()
            }
            SeerError::Unavailable(_) => {
                "The reading service is currently unavailable. Please try again.".into()
            }
            SeerError::Timeout(_) => {
                "The reading took too long to generate. Please try again.".into()
            }
            SeerError::Auth(_) => "The reading service rejected our credentials.".into(),
            SeerError::Config(_) => "Service configuration error.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for SeerError {
    fn from(err: anyhow::Error) -> Self {
        SeerError::Other(err.to_string())
    }
}
