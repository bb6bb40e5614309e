use crate::crawler::CrawlResult;
use crate::output::stats::write_statistics;
use crate::output::traits::{CrawlReporter, CrawlSummary, FailedPage, OutputResult};
use std::io::{self, Stdout, Write};

/// Reporter that prints each page and its links as they complete
///
/// ```text
/// Links found in http://example.com/
/// - http://example.com/a
/// - http://example.com/b
/// ```
pub struct ConsoleReporter<W: Write + Send> {
    out: W,
    show_stats: bool,
}

impl ConsoleReporter<Stdout> {
    /// Reporter writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_stats: true,
        }
    }

    /// Enables or disables the statistics block printed by `finish`
    pub fn with_stats(mut self, show_stats: bool) -> Self {
        self.show_stats = show_stats;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> CrawlReporter for ConsoleReporter<W> {
    fn record_page(&mut self, result: &CrawlResult) -> OutputResult<()> {
        writeln!(self.out, "Links found in {}", result.source_url)?;
        for link in &result.discovered_links {
            writeln!(self.out, "- {}", link)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn record_failure(&mut self, failure: &FailedPage) -> OutputResult<()> {
        writeln!(self.out, "Failed to crawl {}: {}", failure.url, failure.reason)?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, summary: &CrawlSummary) -> OutputResult<()> {
        if self.show_stats {
            writeln!(self.out)?;
            write_statistics(&mut self.out, &summary.stats)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
