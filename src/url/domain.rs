use url::Url;

/// Extracts the host from a URL
///
/// The `url` crate already lowercases domain hosts while parsing, so the
/// returned string can be compared directly against other parsed hosts.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_strand::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(str::to_string)
}

/// Returns true if `href` is an absolute URL whose host is exactly `host`
///
/// Relative and malformed hrefs never belong to the host.
pub fn belongs_to_host(href: &str, host: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => url.host_str() == Some(host),
        Err(_) => false,
    }
}

/// Keeps only the hrefs that point at pages on `host`
///
/// The surviving hrefs keep their original string form and document order.
///
/// # Examples
///
/// ```
/// use sumi_strand::url::filter_same_host;
///
/// let links = vec![
///     "https://example.com/a".to_string(),
///     "https://other.com/b".to_string(),
///     "/relative".to_string(),
/// ];
/// assert_eq!(filter_same_host(links, "example.com"), vec!["https://example.com/a"]);
/// ```
pub fn filter_same_host(links: Vec<String>, host: &str) -> Vec<String> {
    links
        .into_iter()
        .filter(|href| belongs_to_host(href, host))
        .collect()
}
