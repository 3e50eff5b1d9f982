//! Output module for persisting converted pages
//!
//! This module handles:
//! - Writing Markdown documents to the mirrored file layout
//! - Recording crawl statistics

pub mod stats;
mod writer;

pub use stats::{print_statistics, CrawlStats};
pub use writer::{ensure_parent_dirs, write_document, OutputError, OutputResult};
