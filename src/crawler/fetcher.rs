//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Fetcher` capability used by workers
//! - Building HTTP clients with the configured user agent and timeouts
//! - Error classification

use crate::config::Config;
use reqwest::{Client, RequestBuilder};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why a page could not be fetched
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Resolves a URL to the raw document it points at
///
/// Implementations are shared between every worker, so they must be
/// `Send + Sync`, and the returned future must be `Send` so workers can run
/// on the multi-threaded runtime.
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches `url`, which is always an absolute URL
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `Fetcher` backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with a client configured from `config`
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        let request = self.client.get(url);
        async move { fetch_document(request).await }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sumi_strand::config::Config;
/// use sumi_strand::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.request_timeout))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET request and returns the body of a successful response
///
/// Redirects are followed by the client. Any final status outside 2xx is a
/// `FetchError::Status`.
async fn fetch_document(request: RequestBuilder) -> Result<String, FetchError> {
    let response = request.send().await.map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))
}

fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Network(error.to_string())
    }
}
