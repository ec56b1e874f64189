//! Core types: product records, categories, and the result envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag written into every product and success envelope.
pub const SOURCE_TAG: &str = "flipkart_live";

/// A product listing recovered from one result container.
///
/// Only the extractor's validity gate constructs these, so `title` is always
/// non-empty and `selling_price` always non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Listing title, at most 100 characters.
    pub title: String,
    /// Current selling price in whole currency units.
    pub selling_price: u64,
    /// Original price; present only when strictly greater than `selling_price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<u64>,
    /// Percentage off `mrp`; present only alongside `mrp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    /// Absolute image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Absolute product page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Same value as `url`, under the key older callers read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flipkart_url: Option<String>,
    /// Star rating as displayed; not range-checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Process-local pseudo identifier, `live_<hash>`.
    pub product_id: String,
    pub description: String,
    pub in_stock: bool,
    pub category: Category,
    pub brand: String,
    pub availability: String,
    pub source: String,
}

/// Coarse product category guessed from the search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mobile,
    Laptop,
    Electronics,
    Fashion,
    Home,
    Books,
    General,
}

impl Category {
    /// Returns the lowercase name used in JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Laptop => "laptop",
            Self::Electronics => "electronics",
            Self::Fashion => "fashion",
            Self::Home => "home",
            Self::Books => "books",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The top-level result handed back to the caller.
///
/// Serializes to one of two shapes:
///
/// ```text
/// {"success": true,  "products": [...], "total": 3, "query": "...", "source": "flipkart_live"}
/// {"success": false, "products": [],    "error": "...", "query": "..."}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub success: bool,
    pub products: Vec<Product>,
    /// Number of products collected before truncation to `max_results`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SearchEnvelope {
    /// Build a success envelope, truncating `products` to `max_results`.
    pub fn success(query: &str, mut products: Vec<Product>, max_results: usize) -> Self {
        let total = products.len();
        products.truncate(max_results);
        Self {
            success: true,
            products,
            total: Some(total),
            error: None,
            query: query.to_owned(),
            source: Some(SOURCE_TAG.to_owned()),
        }
    }

    /// Build a failure envelope carrying the error message.
    pub fn failure(query: &str, error: impl fmt::Display) -> Self {
        Self {
            success: false,
            products: Vec::new(),
            total: None,
            error: Some(error.to_string()),
            query: query.to_owned(),
            source: None,
        }
    }
}
