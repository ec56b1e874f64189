//! Trait definition for where search result pages come from.
//!
//! [`HttpPageSource`] fetches pages from the live site. The page loop in
//! [`crate::fetcher`] only sees the [`ResultPageSource`] trait, so tests can
//! feed it canned HTML without a network.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::http;

/// What came back for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
    /// A success status with the page body.
    Html(String),
    /// Any non-success status. The page loop stops here.
    Rejected(u16),
}

/// A provider of search result pages.
///
/// All implementations must be `Send + Sync` so a search can run on any
/// tokio runtime flavour.
pub trait ResultPageSource: Send + Sync {
    /// Fetch result page `page` (1-based) for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] when the request cannot be completed
    /// (connect failure, timeout, unreadable body). A response with a
    /// non-success status is not an error; it is [`PageResponse::Rejected`].
    fn fetch_page(
        &self,
        query: &str,
        page: u32,
    ) -> impl std::future::Future<Output = Result<PageResponse, ScrapeError>> + Send;
}

/// Result pages fetched over HTTP with the browser header set.
pub struct HttpPageSource {
    client: reqwest::Client,
    search_url: String,
}

impl HttpPageSource {
    /// Build a source for the endpoint described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: http::build_client(config)?,
            search_url: config.search_url(),
        })
    }

    /// The endpoint pages are requested from.
    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

impl ResultPageSource for HttpPageSource {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<PageResponse, ScrapeError> {
        tracing::trace!(query, page, "requesting result page");

        let page_param = page.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("q", query), ("page", page_param.as_str())])
            .send()
            .await
            .map_err(|e| ScrapeError::Http(format!("page {page} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(PageResponse::Rejected(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ScrapeError::Http(format!("page {page} response read failed: {e}")))?;

        tracing::trace!(page, bytes = html.len(), "result page received");
        Ok(PageResponse::Html(html))
    }
}
