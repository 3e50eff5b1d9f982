//! URL handling module for Docs-Mirror
//!
//! This module provides link normalization, crawl scope checks, and the
//! mapping from page URLs to output file paths.

mod normalize;
mod resolve;

// Re-export main functions
pub use normalize::{is_same_origin, normalize_link};
pub use resolve::{resolve_output_path, OutputPath, DOCUMENT_EXTENSION, INDEX_NAME};
