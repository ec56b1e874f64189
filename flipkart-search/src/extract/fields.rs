//! Per-field fallback chains.
//!
//! Each extractor walks the container's descendants (never the container
//! itself) and returns `None` when nothing usable is found. Extractors do not
//! depend on each other except MRP, which compares against the selling price.

use regex::Regex;
use scraper::ElementRef;

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Descendant elements of `container` in document order, excluding itself.
fn descendant_elements<'a>(container: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    container.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Text nodes under `container` in document order.
fn text_nodes<'a>(container: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    container
        .descendants()
        .filter_map(|node| node.value().as_text().map(|t| &**t))
}

fn first_tag<'a>(container: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    descendant_elements(container).find(|el| el.value().name() == tag)
}

/// First `tag` element whose class attribute contains `needle`, ignoring case.
fn first_tag_with_class<'a>(
    container: ElementRef<'a>,
    tag: &str,
    needle: &str,
) -> Option<ElementRef<'a>> {
    descendant_elements(container).find(|el| {
        el.value().name() == tag
            && el
                .value()
                .attr("class")
                .is_some_and(|class| class.to_lowercase().contains(needle))
    })
}

/// Collapse whitespace runs and trim.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Listing title.
///
/// Tries, in order: a `title`-classed anchor, `div`, then `span`, then the
/// first `h3`, then the first `h2`. The chosen element's text is trimmed and
/// cut to [`MAX_TITLE_CHARS`].
pub fn title(container: ElementRef<'_>) -> Option<String> {
    let element = first_tag_with_class(container, "a", "title")
        .or_else(|| first_tag_with_class(container, "div", "title"))
        .or_else(|| first_tag_with_class(container, "span", "title"))
        .or_else(|| first_tag(container, "h3"))
        .or_else(|| first_tag(container, "h2"))?;
    Some(truncate_chars(&element_text(element), MAX_TITLE_CHARS))
}

/// Parse the amount out of the first price match in `text`.
///
/// Thousands separators are stripped; `"₹12,345"` yields `12345`.
pub fn parse_price(text: &str, pattern: &Regex) -> Option<u64> {
    let digits: String = pattern
        .captures(text)?
        .get(1)?
        .as_str()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    digits.parse().ok()
}

/// The text an element holds through a chain of only children, if any.
///
/// `<div>₹10</div>` and `<div><b>₹10</b></div>` both yield `₹10`; an element
/// with several children (whitespace text included) or none yields `None`.
fn sole_text<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    let mut node = *element;
    loop {
        let mut children = node.children();
        let only = children.next()?;
        if children.next().is_some() {
            return None;
        }
        if let Some(text) = only.value().as_text() {
            return Some(&**text);
        }
        only.value().as_element()?;
        node = only;
    }
}

/// First `tag` element whose sole text contains a price.
fn first_priced_tag<'a>(container: ElementRef<'a>, tag: &str, pattern: &Regex) -> Option<&'a str> {
    descendant_elements(container)
        .filter(|el| el.value().name() == tag)
        .find_map(|el| sole_text(el).filter(|text| pattern.is_match(text)))
}

/// Current selling price.
///
/// Looks for a `div` whose only-child chain ends in price text, then such a
/// `span`, then any text node. Only the first match of the first tier that
/// matches is parsed.
pub fn selling_price(container: ElementRef<'_>, pattern: &Regex) -> Option<u64> {
    let text = first_priced_tag(container, "div", pattern)
        .or_else(|| first_priced_tag(container, "span", pattern))
        .or_else(|| text_nodes(container).find(|text| pattern.is_match(text)))?;
    parse_price(text, pattern)
}

/// Original (pre-discount) price.
///
/// Re-scans all text independently of [`selling_price`] and takes the first
/// price found anywhere. That can be the selling price itself, so the value
/// is kept only if strictly greater than `selling_price` (or than zero when
/// there is no selling price).
pub fn mrp(container: ElementRef<'_>, pattern: &Regex, selling_price: Option<u64>) -> Option<u64> {
    let text = text_nodes(container).find(|text| pattern.is_match(text))?;
    parse_price(text, pattern).filter(|&mrp| mrp > selling_price.unwrap_or(0))
}

/// Make a link found in listing markup absolute.
///
/// `//host/x` becomes `https://host/x`; `/x` becomes `{origin}/x`; anything
/// else is returned unchanged.
pub fn absolutize(link: &str, origin: &str) -> String {
    if link.starts_with("//") {
        format!("https:{link}")
    } else if link.starts_with('/') {
        format!("{origin}{link}")
    } else {
        link.to_owned()
    }
}

/// Source of the first `img` in the container.
pub fn image_url(container: ElementRef<'_>, origin: &str) -> Option<String> {
    let src = first_tag(container, "img")?.value().attr("src")?;
    if src.is_empty() {
        return None;
    }
    Some(absolutize(src, origin))
}

/// Target of the first anchor carrying an `href`.
pub fn product_url(container: ElementRef<'_>, origin: &str) -> Option<String> {
    let href = descendant_elements(container)
        .filter(|el| el.value().name() == "a")
        .find_map(|el| el.value().attr("href"))?;
    Some(absolutize(href, origin))
}

/// Star rating from text such as `4.3★` or `4.3 ★`.
pub fn rating(container: ElementRef<'_>, pattern: &Regex) -> Option<f64> {
    text_nodes(container).find_map(|text| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}
