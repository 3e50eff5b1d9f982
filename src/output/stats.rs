//! Crawl statistics
//!
//! Counters collected by the coordinator during one run and printed when the
//! run finishes.

use crate::crawler::SkipReason;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Number of pages in the link set
    pub discovered: usize,

    /// Pages converted and written
    pub saved: usize,

    /// Pages skipped because the fetch failed
    pub fetch_failures: usize,

    /// Pages skipped because no content region was found
    pub content_missing: usize,

    /// Pages skipped because the document could not be written
    pub write_failures: usize,

    /// Pages whose task panicked
    pub task_failures: usize,
}

impl CrawlStats {
    pub fn new(discovered: usize) -> Self {
        Self {
            discovered,
            ..Self::default()
        }
    }

    /// Records a skipped page under the matching counter
    pub fn record_skip(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::Fetch(_) => self.fetch_failures += 1,
            SkipReason::ContentNotFound => self.content_missing += 1,
            SkipReason::UnsafePath(_) | SkipReason::Write(_) => self.write_failures += 1,
            SkipReason::TaskFailed(_) => self.task_failures += 1,
        }
    }

    pub fn record_saved(&mut self) {
        self.saved += 1;
    }

    /// Total pages skipped for any reason
    pub fn skipped(&self) -> usize {
        self.fetch_failures + self.content_missing + self.write_failures + self.task_failures
    }

    /// Pages that went through the pipeline, saved or skipped
    pub fn processed(&self) -> usize {
        self.saved + self.skipped()
    }
}

/// Prints statistics to stdout in a human-readable format
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Docs-Mirror Statistics ===\n");
    println!("Pages discovered: {}", stats.discovered);
    println!("Pages processed:  {}", stats.processed());
    println!("Pages saved:      {}", stats.saved);
    println!("Pages skipped:    {}", stats.skipped());

    if stats.skipped() > 0 {
        println!("\nSkipped by reason:");
        if stats.fetch_failures > 0 {
            println!("  Fetch failed:      {}", stats.fetch_failures);
        }
        if stats.content_missing > 0 {
            println!("  No main content:   {}", stats.content_missing);
        }
        if stats.write_failures > 0 {
            println!("  Write failed:      {}", stats.write_failures);
        }
        if stats.task_failures > 0 {
            println!("  Task failed:       {}", stats.task_failures);
        }
    }
}
