//! Error types for the flipkart-search crate.
//!
//! Errors carry stable, human-readable messages. They end up verbatim in the
//! `error` field of a failure envelope, so they never include response bodies.

/// Errors that can occur while fetching or parsing search result pages.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request for a result page failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A selector or text pattern could not be built.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid scrape configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for flipkart-search results.
pub type Result<T> = std::result::Result<T, ScrapeError>;
