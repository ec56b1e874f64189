//! Fields synthesized from the query and the extracted title.

use crate::types::Category;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Query keywords per category, checked in this order.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Mobile,
        &[
            "phone",
            "mobile",
            "smartphone",
            "redmi",
            "iphone",
            "samsung",
            "oneplus",
            "realme",
            "vivo",
            "oppo",
        ],
    ),
    (
        Category::Laptop,
        &["laptop", "computer", "pc", "macbook", "dell", "hp", "lenovo", "asus"],
    ),
    (
        Category::Electronics,
        &["tv", "television", "headphone", "speaker", "camera", "tablet"],
    ),
    (
        Category::Fashion,
        &["shirt", "clothing", "fashion", "dress", "shoe", "watch", "bag"],
    ),
    (
        Category::Home,
        &["refrigerator", "washing machine", "ac", "microwave", "furniture"],
    ),
    (Category::Books, &["book", "novel", "textbook", "education"]),
];

/// Brands recognised anywhere in a title, checked in this order.
const KNOWN_BRANDS: &[&str] = &[
    "Samsung", "Apple", "Xiaomi", "OnePlus", "Realme", "Vivo", "Oppo", "Nokia", "Motorola",
    "Sony", "Dell", "HP", "Lenovo", "Asus", "Acer", "MSI",
];

/// Brand used when the title is empty.
const FALLBACK_BRAND: &str = "Brand";

/// Guess the category from keywords contained in the lowercased query.
pub fn category_for_query(query: &str) -> Category {
    let query = query.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| query.contains(kw)))
        .map_or(Category::General, |(category, _)| *category)
}

/// Brand for a title.
///
/// A known brand contained anywhere in the title (case-insensitive) wins;
/// otherwise the title's first word; otherwise `"Brand"`.
pub fn brand_from_title(title: &str) -> String {
    let upper = title.to_uppercase();
    if let Some(brand) = KNOWN_BRANDS
        .iter()
        .find(|brand| upper.contains(&brand.to_uppercase()))
    {
        return (*brand).to_owned();
    }
    title
        .split_whitespace()
        .next()
        .unwrap_or(FALLBACK_BRAND)
        .to_owned()
}

/// Pseudo identifier `live_<hash>` for a title (or the query when there is
/// no title).
///
/// Equal input gives an equal id within one build, but the value is not a
/// stable key across releases and must not be persisted.
pub fn product_id(seed: &str) -> String {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    format!("live_{}", hasher.finish())
}

pub fn description(query: &str) -> String {
    format!("Real-time {query} product from Flipkart with latest pricing and availability.")
}

/// Whole-percent discount of `selling` relative to `mrp`.
///
/// Halves round to even, so 12.5 becomes 12. Returns `None` for a zero MRP.
pub fn discount_percent(mrp: u64, selling: u64) -> Option<i64> {
    if mrp == 0 {
        return None;
    }
    let ratio = (mrp as f64 - selling as f64) / mrp as f64 * 100.0;
    Some(ratio.round_ties_even() as i64)
}
