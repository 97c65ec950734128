//! Error types for the printer library

use thiserror::Error;

/// Rendering error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Document cannot be laid out (empty name, no lines, ...)
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// PDF library failure (font registration, serialization)
    #[error("Render failed: {0}")]
    Render(String),
}

/// Result type for rendering operations
pub type PrintResult<T> = Result<T, PrintError>;
