//! Main content extraction
//!
//! Documentation sites vary their markup between page templates, so the main
//! content region is located by an ordered list of strategies. The first one
//! that finds a non-empty region wins.

use crate::MirrorError;
use scraper::{ElementRef, Html, Selector};

/// The part of a page selected as its main content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFragment {
    /// Outer HTML of the selected element
    pub html: String,

    /// Name of the strategy that produced this fragment
    pub strategy: String,
}

/// One way of locating the main content region of a parsed page
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Returns the content region, or `None` if this strategy finds nothing
    fn try_extract(&self, document: &Html) -> Option<ContentFragment>;
}

/// Extraction strategy backed by a CSS selector
///
/// Matches the first element that has visible text or child elements. The
/// HTML parser always synthesizes `<body>`, so an empty element does not count.
#[derive(Debug, Clone)]
pub struct SelectorStrategy {
    source: String,
    selector: Selector,
}

impl SelectorStrategy {
    pub fn new(selector: &str) -> Result<Self, MirrorError> {
        let parsed = Selector::parse(selector)
            .map_err(|_| MirrorError::InvalidSelector(selector.to_string()))?;
        Ok(Self {
            source: selector.to_string(),
            selector: parsed,
        })
    }
}

impl ExtractionStrategy for SelectorStrategy {
    fn name(&self) -> &str {
        &self.source
    }

    fn try_extract(&self, document: &Html) -> Option<ContentFragment> {
        document
            .select(&self.selector)
            .find(|element| has_content(element))
            .map(|element| ContentFragment {
                html: element.html(),
                strategy: self.source.clone(),
            })
    }
}

fn has_content(element: &ElementRef<'_>) -> bool {
    element.children().any(|child| child.value().is_element())
        || element.text().any(|text| !text.trim().is_empty())
}

/// Ordered chain of extraction strategies
pub struct ContentExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ContentExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Builds a selector-based chain, tried in the given order
    ///
    /// # Example
    ///
    /// ```
    /// use docs_mirror::crawler::ContentExtractor;
    ///
    /// let extractor = ContentExtractor::from_selectors(&["main", "body"]).unwrap();
    /// let fragment = extractor.extract("<body><main><p>Hi</p></main></body>").unwrap();
    /// assert_eq!(fragment.strategy, "main");
    /// ```
    pub fn from_selectors<S: AsRef<str>>(selectors: &[S]) -> Result<Self, MirrorError> {
        let strategies = selectors
            .iter()
            .map(|s| {
                SelectorStrategy::new(s.as_ref())
                    .map(|strategy| Box::new(strategy) as Box<dyn ExtractionStrategy>)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(strategies))
    }

    /// Locates the main content region of a raw HTML page
    ///
    /// Returns `None` when no strategy matches; the caller skips the page.
    pub fn extract(&self, html: &str) -> Option<ContentFragment> {
        let document = Html::parse_document(html);

        for (position, strategy) in self.strategies.iter().enumerate() {
            if let Some(fragment) = strategy.try_extract(&document) {
                if position > 0 {
                    tracing::debug!("Main content found by fallback '{}'", strategy.name());
                }
                return Some(fragment);
            }
        }

        None
    }
}
