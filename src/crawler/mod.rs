//! Crawler module for mirroring documentation pages
//!
//! This module contains the crawl-and-convert pipeline, including:
//! - HTTP fetching
//! - Link discovery from the navigation tree
//! - Main content extraction with ordered fallbacks
//! - HTML to Markdown conversion
//! - Request pacing and progress reporting
//! - Overall crawl coordination

mod converter;
mod coordinator;
mod discovery;
mod extractor;
mod fetcher;
mod reporter;
mod scheduler;

pub use converter::{convert, html_to_markdown, ConvertedDocument};
pub use coordinator::{run_crawl, Coordinator, PageOutcome};
pub use discovery::{discover_links, LinkSet};
pub use extractor::{ContentExtractor, ContentFragment, ExtractionStrategy, SelectorStrategy};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher};
pub use reporter::{CrawlReporter, SkipReason, TracingReporter};
pub use scheduler::Scheduler;
