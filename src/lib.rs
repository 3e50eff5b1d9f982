//! Docs-Mirror: a documentation site mirror
//!
//! This crate crawls a documentation site's navigation tree, extracts the main
//! content of every linked page, converts it to Markdown and writes it to a
//! file layout mirroring the site's URL hierarchy.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Docs-Mirror operations
///
/// Only failures that abort a run surface here. Per-page problems are
/// reported as [`crawler::SkipReason`] values and never stop the crawl.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch seed page {url}: {reason}")]
    SeedFetch { url: String, reason: String },

    #[error("Navigation container '{selector}' not found in {url}")]
    NavigationNotFound { url: String, selector: String },

    #[error("Invalid CSS selector '{0}'")]
    InvalidSelector(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Docs-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::url::{resolve_output_path, OutputPath};
pub use config::Config;
pub use crawler::{run_crawl, Coordinator, LinkSet};
pub use output::CrawlStats;
