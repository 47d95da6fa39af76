//! Error types for the portfolio advisor dialog handler

use thiserror::Error;

/// Result type alias for dialog handler operations
pub type Result<T> = std::result::Result<T, DialogError>;

#[derive(Error, Debug)]
pub enum DialogError {

    // =============================
    // Dialog Errors
    // =============================

    /// No handler is registered for the intent. Fatal for the invocation.
    #[error("Intent with name {0} not supported")]
    UnsupportedIntent(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
