//! Product extraction from a single result container.
//!
//! Listing markup uses generated class names that change between site
//! releases, so nothing here keys on an exact class. Every field is pulled
//! independently through its own fallback chain ([`fields`]); the derived
//! fields ([`derive`]) are synthesized from the query and whatever was found.
//! A record survives only if it has both a title and a selling price.

pub mod derive;
pub mod fields;

use crate::error::ScrapeError;
use crate::types::{Product, SOURCE_TAG};
use regex::Regex;
use scraper::ElementRef;

/// Currency-prefixed price text, e.g. `₹12,345`.
const PRICE_PATTERN: &str = r"₹([0-9,]+)";

/// A decimal immediately followed (modulo whitespace) by a star glyph, e.g. `4.3★`.
const RATING_PATTERN: &str = r"([0-9]+(?:\.[0-9]+)?)\s*★";

/// Compiled text patterns shared by all containers of a page.
#[derive(Debug, Clone)]
pub struct Patterns {
    pub price: Regex,
    pub rating: Regex,
}

impl Patterns {
    /// Compile the price and rating patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Parse`] if a pattern fails to compile.
    pub fn new() -> Result<Self, ScrapeError> {
        let price = Regex::new(PRICE_PATTERN)
            .map_err(|e| ScrapeError::Parse(format!("invalid price pattern: {e}")))?;
        let rating = Regex::new(RATING_PATTERN)
            .map_err(|e| ScrapeError::Parse(format!("invalid rating pattern: {e}")))?;
        Ok(Self { price, rating })
    }
}

/// The raw fields recovered from one container, before the validity gate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub title: Option<String>,
    pub selling_price: Option<u64>,
    pub mrp: Option<u64>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub rating: Option<f64>,
}

impl ExtractedFields {
    /// Run every field extractor against `container`.
    pub fn from_container(container: ElementRef<'_>, patterns: &Patterns, origin: &str) -> Self {
        let title = fields::title(container);
        let selling_price = fields::selling_price(container, &patterns.price);
        let mrp = fields::mrp(container, &patterns.price, selling_price);
        Self {
            title,
            selling_price,
            mrp,
            image_url: fields::image_url(container, origin),
            url: fields::product_url(container, origin),
            rating: fields::rating(container, &patterns.rating),
        }
    }

    /// Attach derived fields and apply the validity gate.
    ///
    /// Returns `None` unless the title is non-empty and the selling price is
    /// non-zero.
    pub fn into_product(self, query: &str) -> Option<Product> {
        let product_id = derive::product_id(self.title.as_deref().unwrap_or(query));
        let brand = derive::brand_from_title(self.title.as_deref().unwrap_or_default());
        let discount = match (self.mrp, self.selling_price) {
            (Some(mrp), Some(selling)) => derive::discount_percent(mrp, selling),
            _ => None,
        };

        let title = self.title.filter(|t| !t.is_empty())?;
        let selling_price = self.selling_price.filter(|&p| p > 0)?;

        Some(Product {
            title,
            selling_price,
            mrp: self.mrp,
            discount,
            image_url: self.image_url,
            flipkart_url: self.url.clone(),
            url: self.url,
            rating: self.rating,
            product_id,
            description: derive::description(query),
            in_stock: true,
            category: derive::category_for_query(query),
            brand,
            availability: "In Stock".to_owned(),
            source: SOURCE_TAG.to_owned(),
        })
    }
}

/// Extract one product from a result container.
///
/// Returns `None` when the container does not yield both a title and a
/// selling price. Never fails: a field that cannot be recovered is simply
/// absent.
pub fn extract_product(
    container: ElementRef<'_>,
    query: &str,
    patterns: &Patterns,
    origin: &str,
) -> Option<Product> {
    ExtractedFields::from_container(container, patterns, origin).into_product(query)
}
