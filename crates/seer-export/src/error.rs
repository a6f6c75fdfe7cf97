//! Export Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ExportError>;

/// PDF export errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// PDF assembly or serialization failed
    #[error("PDF render error: {0}")]
    Render(String),

    /// Serialization produced no bytes
    #[error("PDF render produced an empty document")]
    EmptyOutput,
}

impl ExportError {
    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        "The PDF export failed. Please try again."
    }
}
