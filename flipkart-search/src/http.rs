//! HTTP client with a fixed browser-like header set for result page requests.
//!
//! The listing pages are served differently to clients that do not look like
//! a desktop browser, so every request carries the same User-Agent and
//! `Accept*` headers.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use std::time::Duration;

/// Desktop Chrome User-Agent sent when the config does not override it.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.5";

/// Build a [`reqwest::Client`] configured for result page scraping.
///
/// The client has:
/// - No cookie store: every page request is independent
/// - Timeout from config
/// - Fixed User-Agent (or custom if configured)
/// - Default `Accept`, `Accept-Language` and `Upgrade-Insecure-Requests` headers
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ScrapeConfig) -> Result<reqwest::Client, ScrapeError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .default_headers(default_headers())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ScrapeError::Http(format!("failed to build HTTP client: {e}")))
}

/// Browser headers sent with every page request, apart from the User-Agent.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_EN));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}
