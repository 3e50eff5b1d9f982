//! Progress reporting
//!
//! The coordinator emits events through [`CrawlReporter`] instead of printing.
//! [`TracingReporter`] is the default sink and writes one log line per event.

use crate::url::OutputPath;
use std::fmt;
use std::path::Path;
use url::Url;

/// Why a page produced no output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The page could not be fetched (transport error or non-2xx status)
    Fetch(String),

    /// No main content region and no body fallback
    ContentNotFound,

    /// The output path would escape the output root
    UnsafePath(String),

    /// The document could not be written
    Write(String),

    /// The page task panicked before producing an outcome
    TaskFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Fetch(error) => write!(f, "fetch failed: {}", error),
            SkipReason::ContentNotFound => f.write_str("no main content found"),
            SkipReason::UnsafePath(path) => write!(f, "unsafe output path '{}'", path),
            SkipReason::Write(error) => write!(f, "write failed: {}", error),
            SkipReason::TaskFailed(error) => write!(f, "page task failed: {}", error),
        }
    }
}

/// Observer for crawl progress
///
/// All methods have empty default implementations so sinks only override the
/// events they care about.
pub trait CrawlReporter: Send + Sync {
    fn page_started(&self, _url: &Url, _path: &OutputPath) {}

    fn page_saved(&self, _url: &Url, _file: &Path) {}

    fn page_skipped(&self, _url: &Url, _reason: &SkipReason) {}

    fn run_aborted(&self, _reason: &str) {}

    fn run_completed(&self, _saved: usize) {}
}

/// Reporter that logs every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl CrawlReporter for TracingReporter {
    fn page_started(&self, url: &Url, path: &OutputPath) {
        tracing::info!("Scraping {} -> {}", url, path.document_path());
    }

    fn page_saved(&self, _url: &Url, file: &Path) {
        tracing::info!("Saved content to {}", file.display());
    }

    fn page_skipped(&self, url: &Url, reason: &SkipReason) {
        match reason {
            SkipReason::ContentNotFound => {
                tracing::warn!("Could not find content for {}. Skipping.", url)
            }
            _ => tracing::error!("Skipping {}: {}", url, reason),
        }
    }

    fn run_aborted(&self, reason: &str) {
        tracing::error!("{}. Aborting.", reason);
    }

    fn run_completed(&self, saved: usize) {
        tracing::info!("Scraping finished: {} pages saved", saved);
    }
}
