//! Output module for reporting crawl progress and results
//!
//! This module handles:
//! - Printing each completed page and its links as the crawl progresses
//! - Reporting pages that failed
//! - Collecting and printing crawl statistics

mod console;
mod memory;
pub mod stats;
mod traits;

pub use console::ConsoleReporter;
pub use memory::MemoryReporter;
pub use stats::{write_statistics, CrawlStats};
pub use traits::{CrawlReporter, CrawlSummary, FailedPage, OutputError, OutputResult};
