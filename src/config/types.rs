use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Docs-Mirror
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The documentation site being mirrored
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin that restricts the crawl scope and resolves relative links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the page holding the navigation tree
    #[serde(rename = "seed-path")]
    pub seed_path: String,

    /// Leading path segments removed when deriving output paths
    #[serde(rename = "docs-prefix")]
    pub docs_prefix: String,

    /// CSS selector of the navigation container on the seed page
    #[serde(rename = "nav-selector")]
    pub nav_selector: String,

    /// CSS selectors for the main content region, tried in order
    #[serde(rename = "content-selectors")]
    pub content_selectors: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ai.google.dev".to_string(),
            seed_path: "/gemini-api/docs".to_string(),
            docs_prefix: "gemini-api/docs".to_string(),
            nav_selector: "nav.devsite-book-nav".to_string(),
            content_selectors: vec![
                r#"[role="main"]"#.to_string(),
                "devsite-article-body".to_string(),
                "body".to_string(),
            ],
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Minimum time between the starts of two requests (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Maximum number of pages being fetched at once
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,
}

impl CrawlerConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_delay: 1000,
            request_timeout: 30,
            max_concurrent_fetches: 1,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Full `User-Agent` header value sent with every request
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: "Mozilla/5.0".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory the Markdown files are written under
    #[serde(rename = "output-dir")]
    pub output_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: "gemini_documentation".to_string(),
        }
    }
}

impl Config {
    /// Absolute URL of the seed page (base URL joined with the seed path)
    pub fn seed_url(&self) -> String {
        format!(
            "{}{}",
            self.site.base_url.trim_end_matches('/'),
            self.site.seed_path
        )
    }
}
