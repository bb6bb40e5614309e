use crate::crawler::CrawlResult;
use crate::output::traits::{CrawlReporter, CrawlSummary, FailedPage, OutputResult};

/// Reporter that keeps every event in memory
///
/// Useful when embedding the crawler as a library and for tests.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    /// Completed pages in the order they were accepted
    pub pages: Vec<CrawlResult>,

    /// Failed pages in the order they were reported
    pub failures: Vec<FailedPage>,

    /// Set once the crawl reached quiescence
    pub finished: bool,
}

impl CrawlReporter for MemoryReporter {
    fn record_page(&mut self, result: &CrawlResult) -> OutputResult<()> {
        self.pages.push(result.clone());
        Ok(())
    }

    fn record_failure(&mut self, failure: &FailedPage) -> OutputResult<()> {
        self.failures.push(failure.clone());
        Ok(())
    }

    fn finish(&mut self, _summary: &CrawlSummary) -> OutputResult<()> {
        self.finished = true;
        Ok(())
    }
}
