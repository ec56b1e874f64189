//! Paginated fetching of result pages.
//!
//! Pages are requested strictly one after another with a random pause before
//! each request. The loop ends when the page budget is spent, the site answers
//! with a non-success status, or a later page fails to load.
//!
//! Only a failure on the very first page is reported as an error; after that
//! the pages already in hand are worth more than a clean failure.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::parser::parse_search_results;
use crate::source::{PageResponse, ResultPageSource};
use crate::types::Product;
use rand::Rng;
use std::time::Duration;

/// Results per listing page the page budget is sized against.
const RESULTS_PER_PAGE: usize = 10;

/// Number of pages to request for `max_results`, capped at `max_pages`.
///
/// `min(max_pages, max_results / 10 + 1)`: 25 results need 3 pages, 5 need 1.
pub fn pages_to_scrape(max_results: usize, max_pages: u32) -> u32 {
    let wanted = u32::try_from(max_results / RESULTS_PER_PAGE + 1).unwrap_or(u32::MAX);
    wanted.min(max_pages)
}

/// Pick a pause uniformly from `range` (milliseconds, inclusive).
pub fn request_delay(range: (u64, u64)) -> Duration {
    let (min, max) = range;
    if min >= max {
        return Duration::from_millis(min);
    }
    Duration::from_millis(rand::thread_rng().gen_range(min..=max))
}

/// Walks result pages `1..=pages_to_scrape` for one query.
pub struct Paginator<'a, S> {
    source: &'a S,
    query: &'a str,
    config: &'a ScrapeConfig,
    next_page: u32,
    last_page: u32,
    stopped: bool,
}

impl<'a, S: ResultPageSource> Paginator<'a, S> {
    pub fn new(source: &'a S, query: &'a str, config: &'a ScrapeConfig) -> Self {
        Self {
            source,
            query,
            config,
            next_page: 1,
            last_page: pages_to_scrape(config.max_results, config.max_pages),
            stopped: false,
        }
    }

    /// Number of pages this paginator will request at most.
    pub fn page_budget(&self) -> u32 {
        self.last_page
    }

    /// Fetch the next page's HTML.
    ///
    /// Returns `Ok(None)` once the loop is over: budget spent, a non-success
    /// status, or a transport failure on any page after the first.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the first page cannot be fetched.
    pub async fn next_page(&mut self) -> Result<Option<String>, ScrapeError> {
        if self.stopped || self.next_page > self.last_page {
            return Ok(None);
        }
        let page = self.next_page;
        self.next_page += 1;

        let delay = request_delay(self.config.request_delay_ms);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match self.source.fetch_page(self.query, page).await {
            Ok(PageResponse::Html(html)) => Ok(Some(html)),
            Ok(PageResponse::Rejected(status)) => {
                tracing::warn!(page, status, "result page rejected, stopping");
                self.stopped = true;
                Ok(None)
            }
            Err(err) if page == 1 => {
                self.stopped = true;
                Err(err)
            }
            Err(err) => {
                tracing::warn!(page, error = %err, "result page failed, keeping earlier pages");
                self.stopped = true;
                Ok(None)
            }
        }
    }
}

/// Fetch raw HTML for every page the loop reaches, in page order.
///
/// # Errors
///
/// Returns an error only if the first page fails to load.
pub async fn fetch_pages<S: ResultPageSource>(
    source: &S,
    query: &str,
    config: &ScrapeConfig,
) -> Result<Vec<String>, ScrapeError> {
    let mut paginator = Paginator::new(source, query, config);
    let mut pages = Vec::new();
    while let Some(html) = paginator.next_page().await? {
        pages.push(html);
    }
    Ok(pages)
}

/// Fetch and parse pages until `config.max_results` products are collected
/// or the page loop ends.
///
/// The returned list is not truncated; the envelope does that so it can
/// report the pre-truncation total.
///
/// # Errors
///
/// Returns an error if the first page fails to load or the text patterns
/// cannot be built.
pub async fn collect_products<S: ResultPageSource>(
    source: &S,
    query: &str,
    config: &ScrapeConfig,
) -> Result<Vec<Product>, ScrapeError> {
    let mut paginator = Paginator::new(source, query, config);
    let mut products: Vec<Product> = Vec::new();
    let mut page = 0u32;

    while let Some(html) = paginator.next_page().await? {
        page += 1;
        let page_products = parse_search_results(&html, query, config)?;
        tracing::debug!(page, count = page_products.len(), "page products extracted");
        products.extend(page_products);

        if products.len() >= config.max_results {
            break;
        }
    }

    tracing::debug!(
        pages = page,
        budget = paginator.page_budget(),
        total = products.len(),
        "page loop finished"
    );
    Ok(products)
}
