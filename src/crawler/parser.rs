//! HTML link extraction
//!
//! Workers hand fetched documents to a `LinkExtractor`, which returns the raw
//! `href` values in document order. Resolution and filtering happen later in
//! the same-host filter.

use scraper::{Html, Selector};

/// Turns document content into the raw hrefs it contains
pub trait LinkExtractor: Send + Sync + 'static {
    /// Returns every href in `content`, unfiltered, in document order
    fn extract_links(&self, content: &str) -> Vec<String>;
}

/// `LinkExtractor` for HTML documents
///
/// Collects the `href` attribute of every `<a>` element. Values are returned
/// exactly as written in the markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, content: &str) -> Vec<String> {
        extract_hrefs(content)
    }
}

/// Extracts the href of every `<a>` element in an HTML document
///
/// # Example
///
/// ```
/// use sumi_strand::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a><a href="https://example.com/x">X</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/page", "https://example.com/x"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
