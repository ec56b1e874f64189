//! Scrape configuration with sensible defaults.
//!
//! [`ScrapeConfig`] holds the upstream origin, pagination limits, timeouts and
//! request pacing. Values are immutable for the duration of one search and are
//! passed explicitly to the fetcher; nothing here is process-global.

use crate::error::ScrapeError;
use url::Url;

/// Site origin used to absolutise root-relative links and image sources.
pub const DEFAULT_BASE_URL: &str = "https://www.flipkart.com";

/// Path of the search endpoint below [`DEFAULT_BASE_URL`].
pub const DEFAULT_SEARCH_PATH: &str = "/search";

/// Configuration for a search scrape.
///
/// Use [`Default::default()`] for the values the live site expects, or
/// override individual fields.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site origin, without a trailing slash.
    pub base_url: String,
    /// Search endpoint path, starting with `/`.
    pub search_path: String,
    /// Maximum number of products in the returned envelope.
    pub max_results: usize,
    /// Upper bound on result pages fetched per search.
    pub max_pages: u32,
    /// Maximum number of candidate containers examined on one page.
    pub max_containers_per_page: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Random delay range in milliseconds `(min, max)` slept before each page
    /// request, to stay under upstream rate limits.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent string. If `None`, a fixed desktop Chrome string is sent.
    pub user_agent: Option<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            search_path: DEFAULT_SEARCH_PATH.to_owned(),
            max_results: 25,
            max_pages: 3,
            max_containers_per_page: 25,
            timeout_seconds: 10,
            request_delay_ms: (1000, 2000),
            user_agent: None,
        }
    }
}

impl ScrapeConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` parses as an absolute `http` or `https` URL
    /// - `search_path` starts with `/`
    /// - `max_results`, `max_pages`, `max_containers_per_page` and
    ///   `timeout_seconds` are greater than 0
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    pub fn validate(&self) -> Result<(), ScrapeError> {
        let parsed = Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::Config(format!("base_url is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScrapeError::Config(
                "base_url must use http or https".into(),
            ));
        }
        if !self.search_path.starts_with('/') {
            return Err(ScrapeError::Config(
                "search_path must start with '/'".into(),
            ));
        }
        if self.max_results == 0 {
            return Err(ScrapeError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.max_pages == 0 {
            return Err(ScrapeError::Config(
                "max_pages must be greater than 0".into(),
            ));
        }
        if self.max_containers_per_page == 0 {
            return Err(ScrapeError::Config(
                "max_containers_per_page must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ScrapeError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(ScrapeError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}{}", self.origin(), self.search_path)
    }

    /// The base URL with any trailing slash removed.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
