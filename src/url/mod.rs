//! URL handling module for Sumi-Strand
//!
//! This module provides seed validation and the same-host filter applied to
//! every discovered link.

mod domain;

use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::{belongs_to_host, extract_host, filter_same_host};

/// A validated seed URL
///
/// The seed keeps the form it was given in (trimmed, with `http://` added if
/// it had no scheme); it is compared against discovered links as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    url: String,
    host: String,
}

impl Seed {
    /// The seed as it enters the frontier
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Hostname every crawled page must share
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Validates a seed URL before any worker is spawned
///
/// Seeds given without a scheme (`example.com/docs`, `example.com:8080/x`)
/// are treated as `http://`. The result must use `http` or `https` and must
/// carry a host.
///
/// # Examples
///
/// ```
/// use sumi_strand::url::validate_seed;
///
/// let seed = validate_seed("example.com/docs").unwrap();
/// assert_eq!(seed.as_str(), "http://example.com/docs");
/// assert_eq!(seed.host(), "example.com");
///
/// assert!(validate_seed("ftp://example.com/").is_err());
/// ```
pub fn validate_seed(raw: &str) -> UrlResult<Seed> {
    let raw = raw.trim();

    let (url, parsed) = match Url::parse(raw) {
        // `host:port/path` parses with the host as its scheme
        Ok(parsed) if !is_http(&parsed) && !parsed.has_host() && looks_like_host_port(raw) => {
            parse_with_http(raw)
                .ok_or_else(|| UrlError::InvalidScheme(parsed.scheme().to_string()))?
        }
        Ok(parsed) => (raw.to_string(), parsed),
        Err(::url::ParseError::RelativeUrlWithoutBase) => {
            let with_scheme = format!("http://{}", raw);
            let parsed = Url::parse(&with_scheme).map_err(|source| UrlError::Parse {
                url: raw.to_string(),
                source,
            })?;
            (with_scheme, parsed)
        }
        Err(source) => {
            return Err(UrlError::Parse {
                url: raw.to_string(),
                source,
            })
        }
    };

    if !is_http(&parsed) {
        return Err(UrlError::InvalidScheme(parsed.scheme().to_string()));
    }

    let host = match extract_host(&parsed) {
        Some(host) if !host.is_empty() => host,
        _ => return Err(UrlError::MissingHost(raw.to_string())),
    };

    Ok(Seed { url, host })
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn looks_like_host_port(raw: &str) -> bool {
    raw.split_once(':')
        .map_or(false, |(_, rest)| rest.starts_with(|c: char| c.is_ascii_digit()))
}

fn parse_with_http(raw: &str) -> Option<(String, Url)> {
    let with_scheme = format!("http://{}", raw);
    let parsed = Url::parse(&with_scheme).ok()?;
    parsed.has_host().then_some((with_scheme, parsed))
}
