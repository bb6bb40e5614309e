//! Sumi-Strand: a single-domain link crawler
//!
//! This crate follows every hyperlink that stays on a seed URL's hostname,
//! fetching pages with a bounded pool of concurrent workers until no new
//! pages remain.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use crate::crawler::{FetchError, WorkerId};
use thiserror::Error;

/// Main error type for Sumi-Strand operations
#[derive(Debug, Error)]
pub enum StrandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(#[from] UrlError),

    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Worker exited unexpectedly while crawling {url}")]
    WorkerCrashed { url: String },

    #[error("Invalid transition for worker {worker}: {from:?} -> {to:?}")]
    InvalidTransition {
        worker: WorkerId,
        from: state::WorkerState,
        to: state::WorkerState,
    },

    #[error("No such worker: {0}")]
    UnknownWorker(WorkerId),

    #[error("Worker {0} is no longer accepting commands")]
    WorkerGone(WorkerId),

    #[error("Worker pool is full ({0} workers)")]
    PoolFull(usize),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {source}")]
    Parse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Sumi-Strand operations
pub type Result<T> = std::result::Result<T, StrandError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlResult, Coordinator};
pub use output::{CrawlReporter, CrawlSummary};
pub use state::WorkerState;
pub use url::{filter_same_host, validate_seed, Seed};
