//! # flipkart-search
//!
//! Live product search against Flipkart's HTML result pages.
//!
//! Result pages carry no stable identifiers and their class names are
//! regenerated between releases, so products are recovered heuristically:
//! containers are located through a prioritized chain of structural signals
//! and each field is pulled through its own fallback chain.
//!
//! ## Design
//!
//! - Up to three result pages per search, fetched sequentially with a random
//!   1–2 s pause before each request
//! - Container tiers: `data-id` attribute, then `product` classes, then `item` classes
//! - Per-field fallbacks for title, prices, image, link and rating
//! - Derived fields (category, brand, discount, id) synthesized per record
//! - Records without a title and a selling price are dropped
//! - Errors never escape [`search`]: they become a failure [`SearchEnvelope`]
//!
//! Nothing is cached or persisted between calls.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod http;
pub mod parser;
pub mod source;
pub mod types;

pub use config::ScrapeConfig;
pub use error::{Result, ScrapeError};
pub use source::{HttpPageSource, PageResponse, ResultPageSource};
pub use types::{Category, Product, SearchEnvelope};

/// Search the live site and return the result envelope.
///
/// Validates `config`, fetches up to `pages_to_scrape` pages and extracts
/// products until `config.max_results` are collected. Never fails: an
/// invalid config or a failure on the first page produces a failure envelope,
/// which is also logged at error level.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = flipkart_search::ScrapeConfig::default();
/// let envelope = flipkart_search::search("redmi note 12", &config).await;
/// for product in &envelope.products {
///     println!("{}: ₹{}", product.title, product.selling_price);
/// }
/// # }
/// ```
pub async fn search(query: &str, config: &ScrapeConfig) -> SearchEnvelope {
    let source = match config.validate().and_then(|()| HttpPageSource::new(config)) {
        Ok(source) => source,
        Err(err) => return failure(query, err),
    };
    search_with_source(&source, query, config).await
}

/// Like [`search`], but pages come from `source` instead of the network.
///
/// `config` is still validated first.
pub async fn search_with_source<S: ResultPageSource>(
    source: &S,
    query: &str,
    config: &ScrapeConfig,
) -> SearchEnvelope {
    if let Err(err) = config.validate() {
        return failure(query, err);
    }
    match fetcher::collect_products(source, query, config).await {
        Ok(products) => {
            tracing::debug!(count = products.len(), "search complete");
            SearchEnvelope::success(query, products, config.max_results)
        }
        Err(err) => failure(query, err),
    }
}

fn failure(query: &str, err: ScrapeError) -> SearchEnvelope {
    tracing::error!(error = %err, "error scraping Flipkart");
    SearchEnvelope::failure(query, err)
}
