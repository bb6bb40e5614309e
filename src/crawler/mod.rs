//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and HTML link extraction
//! - The frontier and visited-set bookkeeping
//! - The bounded worker pool
//! - The coordinator loop and its termination protocol

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod pool;
mod worker;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher};
pub use frontier::{Frontier, VisitedSet};
pub use parser::{extract_hrefs, HtmlLinkExtractor, LinkExtractor};
pub use pool::WorkerPool;
pub use worker::{crawl_page, CrawlResult, WorkerCommand, WorkerEvent, WorkerId};

use crate::config::Config;
use crate::output::{CrawlReporter, CrawlSummary};
use crate::url::validate_seed;
use crate::StrandError;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed URL
/// 2. Build the HTTP client
/// 3. Run the coordinator until no work remains
///
/// # Arguments
///
/// * `seed` - The URL to start from; its host bounds the crawl
/// * `config` - The crawler configuration
/// * `reporter` - Receives every completed page and failure
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed successfully
/// * `Err(StrandError)` - The seed was invalid or the crawl was aborted
///
/// # Example
///
/// ```no_run
/// use sumi_strand::config::Config;
/// use sumi_strand::crawler::crawl;
/// use sumi_strand::output::ConsoleReporter;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut reporter = ConsoleReporter::stdout();
/// let summary = crawl("https://example.com/", &Config::default(), &mut reporter).await?;
/// println!("{} pages", summary.visited.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    seed: &str,
    config: &Config,
    reporter: &mut dyn CrawlReporter,
) -> Result<CrawlSummary, StrandError> {
    let seed = validate_seed(seed)?;
    let fetcher = HttpFetcher::new(config)?;
    let coordinator = Coordinator::new(seed, &config.crawler, fetcher, HtmlLinkExtractor);
    coordinator.run(reporter).await
}
