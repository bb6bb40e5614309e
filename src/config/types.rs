use serde::Deserialize;

/// Main configuration structure for Sumi-Strand
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of workers fetching pages at the same time
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: usize,

    /// Total time allowed for a single page request (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Time allowed to establish a connection (seconds)
    #[serde(rename = "connect-timeout", default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// What to do when a page cannot be fetched
    #[serde(rename = "on-fetch-error", default)]
    pub on_fetch_error: FetchErrorPolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            on_fetch_error: FetchErrorPolicy::default(),
        }
    }
}

/// How the coordinator reacts to a failed fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchErrorPolicy {
    /// Stop every worker and fail the whole crawl
    #[default]
    Abort,
    /// Record the failed page and keep crawling
    Continue,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `CrawlerName/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

fn default_max_workers() -> usize {
    1
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_crawler_name() -> String {
    "SumiStrand".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
