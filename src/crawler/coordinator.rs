//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl that ties the pipeline together:
//! - Creating the output root
//! - Fetching the seed page and discovering the link set
//! - Running fetch, extract, convert and write for every page
//! - Pacing requests and reporting progress
//!
//! The run moves through `Init -> DiscoverLinks -> CrawlEach* -> Done`. A seed
//! fetch failure or a missing navigation container aborts it. Every other
//! failure only skips the page it happened on.

use crate::config::{validate, Config};
use crate::crawler::converter::convert;
use crate::crawler::discovery::{discover_links, LinkSet};
use crate::crawler::extractor::ContentExtractor;
use crate::crawler::fetcher::{FetchResult, Fetcher};
use crate::crawler::reporter::{CrawlReporter, SkipReason, TracingReporter};
use crate::crawler::scheduler::Scheduler;
use crate::output::{write_document, CrawlStats, OutputError};
use crate::url::OutputPath;
use crate::MirrorError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// What happened to a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The document was written to this file
    Saved(PathBuf),

    /// No file was written
    Skipped(SkipReason),
}

/// Everything a page task needs, shared between tasks
struct PageContext {
    fetcher: Fetcher,
    extractor: ContentExtractor,
    scheduler: Scheduler,
    output_root: PathBuf,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    base_url: Url,
    seed_url: Url,
    context: Arc<PageContext>,
    reporter: Arc<dyn CrawlReporter>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Progress is reported through [`TracingReporter`] unless replaced with
    /// [`Coordinator::with_reporter`].
    ///
    /// # Arguments
    ///
    /// * `config` - The mirror configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MirrorError)` - The configuration is invalid or the client failed to build
    pub fn new(config: Config) -> Result<Self, MirrorError> {
        validate(&config)?;

        let base_url = Url::parse(&config.site.base_url)?;
        let seed_url = Url::parse(&config.seed_url())?;
        let selectors = config.site.content_selectors.as_slice();

        let context = PageContext {
            fetcher: Fetcher::from_config(&config)?,
            extractor: ContentExtractor::from_selectors(selectors)?,
            scheduler: Scheduler::from_config(&config.crawler),
            output_root: PathBuf::from(&config.output.output_dir),
        };

        Ok(Self {
            config: Arc::new(config),
            base_url,
            seed_url,
            context: Arc::new(context),
            reporter: Arc::new(TracingReporter),
        })
    }

    /// Replaces the progress reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn CrawlReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.context.output_root
    }

    /// Fetches the seed page and builds the link set
    ///
    /// Writes nothing; `--dry-run` uses this on its own.
    ///
    /// # Returns
    ///
    /// * `Ok(LinkSet)` - The pages to crawl, in crawl order
    /// * `Err(MirrorError::SeedFetch)` - The seed page could not be fetched
    /// * `Err(MirrorError::NavigationNotFound)` - The seed page has no navigation
    pub async fn discover(&self) -> Result<LinkSet, MirrorError> {
        tracing::info!("Fetching seed page {}", self.seed_url);

        self.context.scheduler.wait_turn().await;
        let body = match self.context.fetcher.fetch(&self.seed_url).await {
            FetchResult::Success { body, .. } => body,
            failure => {
                return Err(MirrorError::SeedFetch {
                    url: self.seed_url.to_string(),
                    reason: failure.to_string(),
                })
            }
        };

        discover_links(
            &body,
            self.seed_url.as_str(),
            &self.base_url,
            &self.config.site.nav_selector,
            &self.config.site.docs_prefix,
        )
    }

    /// Runs the crawl
    ///
    /// Pages are started in link set order. With `max-concurrent-fetches = 1`
    /// each page is fully written before the next one is fetched. A page task
    /// that panics is reported and counted as skipped.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStats)` - The run reached `Done`
    /// * `Err(MirrorError)` - The run aborted before crawling any page
    pub async fn run(&self) -> Result<CrawlStats, MirrorError> {
        let reporter = Arc::clone(&self.reporter);

        // Init
        if let Err(e) = tokio::fs::create_dir_all(&self.context.output_root).await {
            reporter.run_aborted(&format!(
                "Failed to create output directory {}: {}",
                self.context.output_root.display(),
                e
            ));
            return Err(e.into());
        }

        // DiscoverLinks
        let links = match self.discover().await {
            Ok(links) => links,
            Err(e) => {
                reporter.run_aborted(&e.to_string());
                return Err(e);
            }
        };

        tracing::info!("Found {} pages to scrape", links.len());
        tracing::debug!(
            "Requests spaced at least {:?} apart",
            self.context.scheduler.delay()
        );
        let mut stats = CrawlStats::new(links.len());

        // CrawlEach
        let mut tasks = JoinSet::new();
        let mut pending = HashMap::new();
        for (url, path) in links {
            let permit = self.context.scheduler.acquire_slot().await;
            let context = Arc::clone(&self.context);
            let task_reporter = Arc::clone(&reporter);
            let page_url = url.clone();

            let handle = tasks.spawn(async move {
                let _permit = permit;
                process_page(&context, task_reporter.as_ref(), url, path).await
            });
            pending.insert(handle.id(), page_url);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, outcome)) => {
                    pending.remove(&id);
                    match outcome {
                        PageOutcome::Saved(_) => stats.record_saved(),
                        PageOutcome::Skipped(reason) => stats.record_skip(&reason),
                    }
                }
                Err(e) => {
                    let reason = SkipReason::TaskFailed(e.to_string());
                    match pending.remove(&e.id()) {
                        Some(url) => reporter.page_skipped(&url, &reason),
                        None => tracing::error!("Page task failed: {}", e),
                    }
                    stats.record_skip(&reason);
                }
            }
        }

        // Done
        reporter.run_completed(stats.saved);
        Ok(stats)
    }
}

/// Fetches, extracts, converts and writes one page
async fn process_page(
    context: &PageContext,
    reporter: &dyn CrawlReporter,
    url: Url,
    path: OutputPath,
) -> PageOutcome {
    reporter.page_started(&url, &path);

    let outcome = crawl_page(context, &url, &path).await;

    match &outcome {
        PageOutcome::Saved(file) => reporter.page_saved(&url, file),
        PageOutcome::Skipped(reason) => reporter.page_skipped(&url, reason),
    }

    outcome
}

async fn crawl_page(context: &PageContext, url: &Url, path: &OutputPath) -> PageOutcome {
    context.scheduler.wait_turn().await;

    let body = match context.fetcher.fetch(url).await {
        FetchResult::Success { body, .. } => body,
        failure => return PageOutcome::Skipped(SkipReason::Fetch(failure.to_string())),
    };

    let Some(fragment) = context.extractor.extract(&body) else {
        return PageOutcome::Skipped(SkipReason::ContentNotFound);
    };

    let document = convert(&fragment);

    match write_document(&context.output_root, path, document.as_str()).await {
        Ok(file) => PageOutcome::Saved(file),
        Err(OutputError::UnsafePath(path)) => PageOutcome::Skipped(SkipReason::UnsafePath(path)),
        Err(e) => PageOutcome::Skipped(SkipReason::Write(e.to_string())),
    }
}

/// Runs the main crawl operation
///
/// # Arguments
///
/// * `config` - The mirror configuration
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed
/// * `Err(MirrorError)` - Crawl aborted
///
/// # Example
///
/// ```no_run
/// use docs_mirror::config::Config;
/// use docs_mirror::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_crawl(Config::default()).await?;
/// println!("{} pages saved", stats.saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlStats, MirrorError> {
    Coordinator::new(config)?.run().await
}
