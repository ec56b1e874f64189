//! Error types for the flipkart-live command.
//!
//! Scrape failures never surface here: they are reported inside the JSON
//! envelope. These errors cover the command's own plumbing.

/// Errors raised by config loading and output writing.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file could not be parsed or holds invalid values.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Envelope could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
