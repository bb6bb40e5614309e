//! Reporter trait and types
//!
//! This module defines the interface the coordinator uses to publish crawl
//! events, and the summary returned when a crawl finishes.

use crate::crawler::CrawlResult;
use crate::output::stats::CrawlStats;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A URL whose crawl task failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPage {
    /// The URL that failed
    pub url: String,

    /// Human-readable reason
    pub reason: String,
}

/// Everything known about a crawl once it reached quiescence
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    /// Seed URL the crawl started from
    pub seed: String,

    /// Visited pages, in the order the coordinator accepted them
    pub visited: Vec<String>,

    /// Pages whose task failed
    pub failed: Vec<FailedPage>,

    pub stats: CrawlStats,
}

/// Trait for crawl reporters
///
/// The coordinator calls these methods from its decision loop, one event at
/// a time, in the order it accepts them.
pub trait CrawlReporter: Send {
    /// Records a completed page and its same-host links
    fn record_page(&mut self, result: &CrawlResult) -> OutputResult<()>;

    /// Records a page whose crawl task failed
    fn record_failure(&mut self, failure: &FailedPage) -> OutputResult<()>;

    /// Called once the crawl reached quiescence
    fn finish(&mut self, summary: &CrawlSummary) -> OutputResult<()>;
}
