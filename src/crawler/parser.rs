//! HTML parser for extracting outbound links
//!
//! Only anchors whose `href` is already an absolute `http` or `https` URL are
//! kept. Relative links, fragments and other schemes are dropped rather than
//! resolved against the page URL.

use scraper::{Html, Selector};
use url::Url;

/// Extracts up to `limit` absolute http(s) links from an HTML document
///
/// Links are returned in document order, exactly as written in the `href`
/// attribute (minus surrounding whitespace).
///
/// # Example
///
/// ```
/// use link_tally::crawler::extract_links;
///
/// let html = r#"<a href="https://example.com/a">A</a><a href="/b">B</a>"#;
/// assert_eq!(extract_links(html, 10), vec!["https://example.com/a"]);
/// ```
pub fn extract_links(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        links.extend(
            document
                .select(&a_selector)
                .filter_map(|element| element.value().attr("href"))
                .filter_map(accept_link)
                .take(limit),
        );
    }

    links
}

/// Returns the trimmed href if it is an absolute http(s) URL
fn accept_link(href: &str) -> Option<String> {
    let href = href.trim();

    if !href.starts_with("http") {
        return None;
    }

    match Url::parse(href) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(href.to_string()),
        _ => None,
    }
}
