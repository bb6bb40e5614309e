//! Crawl statistics
//!
//! Counters collected by the coordinator and the plain-text block printed at
//! the end of a crawl.

use std::io::Write;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStats {
    /// Pages fetched and extracted successfully
    pub pages_visited: usize,

    /// Same-host links reported by workers, duplicates included
    pub links_discovered: usize,

    /// Pages whose task failed
    pub pages_failed: usize,

    /// Workers spawned over the whole crawl
    pub workers_spawned: usize,

    /// Highest number of workers active at once
    pub peak_workers: usize,

    /// Wall-clock time from first spawn to quiescence
    pub elapsed: Duration,
}

impl CrawlStats {
    /// Pages visited per second of wall-clock time
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.pages_visited as f64 / secs
    }

    /// Share of attempted pages that were crawled successfully, in percent
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_visited + self.pages_failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.pages_visited as f64 / attempted as f64) * 100.0
    }
}

/// Writes statistics in a human-readable block
pub fn write_statistics<W: Write>(out: &mut W, stats: &CrawlStats) -> std::io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===")?;
    writeln!(out, "  Pages visited: {}", stats.pages_visited)?;
    writeln!(
        out,
        "  Pages failed: {} ({:.1}% success)",
        stats.pages_failed,
        stats.success_rate()
    )?;
    writeln!(out, "  Links discovered: {}", stats.links_discovered)?;
    writeln!(
        out,
        "  Workers: {} spawned, {} peak",
        stats.workers_spawned, stats.peak_workers
    )?;
    writeln!(
        out,
        "  Elapsed: {:.2}s ({:.2} pages/sec)",
        stats.elapsed.as_secs_f64(),
        stats.pages_per_second()
    )?;
    Ok(())
}
