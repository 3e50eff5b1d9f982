//! HTML to Markdown conversion
//!
//! `html2md` keeps hyperlinks as Markdown links and never wraps lines, which
//! keeps the generated files diff-friendly.

use crate::crawler::extractor::ContentFragment;

/// Markdown produced from a content fragment, written verbatim to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument(String);

impl ConvertedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Converts a content fragment to Markdown
///
/// Pure and deterministic. Malformed markup degrades to best-effort text.
pub fn convert(fragment: &ContentFragment) -> ConvertedDocument {
    ConvertedDocument(html_to_markdown(&fragment.html))
}

/// Converts an HTML snippet to Markdown
pub fn html_to_markdown(html: &str) -> String {
    html2md::parse_html(html)
}
