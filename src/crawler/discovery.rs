//! Link discovery from the seed page's navigation tree
//!
//! Only links inside the navigation container are followed. Each admitted link
//! is absolute, fragment-free and same-origin with the base URL.

use crate::url::{is_same_origin, normalize_link, resolve_output_path, OutputPath};
use crate::MirrorError;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Ordered mapping from page URL to output path
///
/// Keys are unique and the first mapping seen for a URL wins. Iteration order
/// is insertion order, which is also crawl order.
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    entries: Vec<(Url, OutputPath)>,
    seen: HashSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mapping unless the URL is already present
    ///
    /// Returns true if the entry was added.
    pub fn insert(&mut self, url: Url, path: OutputPath) -> bool {
        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }
        self.entries.push((url, path));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Url, OutputPath)> {
        self.entries.iter()
    }
}

impl IntoIterator for LinkSet {
    type Item = (Url, OutputPath);
    type IntoIter = std::vec::IntoIter<(Url, OutputPath)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Builds the link set from the seed page
///
/// # Discovery Rules
///
/// 1. Find the first element matching `nav_selector`; fail if there is none
/// 2. Visit every `a[href]` inside it
/// 3. Resolve the href against `base_url`, dropping fragments and special schemes
/// 4. Drop links whose origin differs from `base_url`
/// 5. Map the URL to its output path and insert it, first occurrence wins
///
/// # Arguments
///
/// * `seed_html` - Raw HTML of the seed page
/// * `seed_url` - URL the seed page was fetched from (for error messages)
/// * `base_url` - Crawl scope and base for relative links
/// * `nav_selector` - CSS selector of the navigation container
/// * `docs_prefix` - Path prefix removed when deriving output paths
///
/// # Returns
///
/// * `Ok(LinkSet)` - The discovered pages, possibly empty
/// * `Err(MirrorError::NavigationNotFound)` - The seed page has no navigation
/// * `Err(MirrorError::InvalidSelector)` - `nav_selector` does not parse
///
/// # Example
///
/// ```
/// use docs_mirror::crawler::discover_links;
/// use url::Url;
///
/// let html = r#"<nav class="devsite-book-nav"><a href="/gemini-api/docs/models">Models</a></nav>"#;
/// let base = Url::parse("https://ai.google.dev").unwrap();
/// let links = discover_links(html, "https://ai.google.dev/gemini-api/docs", &base,
///     "nav.devsite-book-nav", "gemini-api/docs").unwrap();
/// assert_eq!(links.len(), 1);
/// ```
pub fn discover_links(
    seed_html: &str,
    seed_url: &str,
    base_url: &Url,
    nav_selector: &str,
    docs_prefix: &str,
) -> Result<LinkSet, MirrorError> {
    let nav = Selector::parse(nav_selector)
        .map_err(|_| MirrorError::InvalidSelector(nav_selector.to_string()))?;
    let anchors = Selector::parse("a[href]")
        .map_err(|_| MirrorError::InvalidSelector("a[href]".to_string()))?;

    let document = Html::parse_document(seed_html);
    let Some(container) = document.select(&nav).next() else {
        return Err(MirrorError::NavigationNotFound {
            url: seed_url.to_string(),
            selector: nav_selector.to_string(),
        });
    };

    let mut links = LinkSet::new();
    let mut excluded = 0usize;
    let mut duplicates = 0usize;

    for element in container.select(&anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(url) = normalize_link(href, base_url) else {
            tracing::trace!("Ignoring href '{}'", href);
            excluded += 1;
            continue;
        };

        if !is_same_origin(&url, base_url) {
            tracing::trace!("Ignoring cross-origin link {}", url);
            excluded += 1;
            continue;
        }

        let path = resolve_output_path(&url, docs_prefix);
        if !links.insert(url, path) {
            duplicates += 1;
        }
    }

    tracing::debug!(
        "Discovered {} pages ({} excluded, {} duplicates)",
        links.len(),
        excluded,
        duplicates
    );

    Ok(links)
}
