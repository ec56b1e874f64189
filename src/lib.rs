//! flipkart-live: command-line live product search.
//!
//! Thin shell around [`flipkart_search`]: loads the optional TOML config,
//! runs one search, and prints the result envelope as indented JSON. Scrape
//! failures are part of the envelope; only config and output problems are
//! errors at this level.

pub mod config;
pub mod error;
pub mod output;

pub use config::AppConfig;
pub use error::{AppError, Result};

use flipkart_search::{ScrapeConfig, SearchEnvelope};
use std::io::Write;

/// Run one search for `query` and write the envelope to `out`.
///
/// Returns the envelope that was written so callers can log a summary.
///
/// # Errors
///
/// Returns an error only if the envelope cannot be serialized or written.
pub async fn run<W: Write>(
    query: &str,
    config: &ScrapeConfig,
    out: &mut W,
) -> Result<SearchEnvelope> {
    tracing::trace!(query, "starting search");
    let envelope = flipkart_search::search(query, config).await;
    output::write_envelope(out, &envelope)?;
    Ok(envelope)
}
