//! Mapping from page URLs to output paths
//!
//! `/gemini-api/docs/models` with the docs prefix `gemini-api/docs` becomes
//! `models`, which is persisted as `models.md` under the output root.

use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Name used when a URL path has nothing left after prefix stripping
pub const INDEX_NAME: &str = "index";

/// Extension of every written document
pub const DOCUMENT_EXTENSION: &str = "md";

/// A relative, `/`-separated output path derived from a page URL
///
/// Never absolute and never empty. A trailing `/` marks a directory, which is
/// persisted as its index document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputPath(String);

impl OutputPath {
    /// Wraps a caller-supplied relative path
    ///
    /// Leading separators are dropped; an empty path becomes the index name.
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = path.as_ref().trim_start_matches('/');
        if path.is_empty() {
            Self(INDEX_NAME.to_string())
        } else {
            Self(path.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the path denotes a directory (trailing separator)
    pub fn is_directory(&self) -> bool {
        self.0.ends_with('/')
    }

    /// The relative file name the document is persisted under
    ///
    /// Directories get `index.md` appended, other paths get `.md` appended
    /// unless they already carry it. Applying this to its own output is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use docs_mirror::url::OutputPath;
    ///
    /// assert_eq!(OutputPath::new("models").document_path(), "models.md");
    /// assert_eq!(OutputPath::new("api/").document_path(), "api/index.md");
    /// assert_eq!(OutputPath::new("notes.MD").document_path(), "notes.MD");
    /// ```
    pub fn document_path(&self) -> String {
        if self.is_directory() {
            format!("{}{}.{}", self.0, INDEX_NAME, DOCUMENT_EXTENSION)
        } else if has_document_extension(&self.0) {
            self.0.clone()
        } else {
            format!("{}.{}", self.0, DOCUMENT_EXTENSION)
        }
    }

    /// Joins the document path onto an output root
    pub fn to_file_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.document_path().split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for OutputPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn has_document_extension(path: &str) -> bool {
    path.to_ascii_lowercase()
        .ends_with(&format!(".{}", DOCUMENT_EXTENSION))
}

/// Derives the output path for a page URL
///
/// # Resolution Steps
///
/// 1. Keep only the path component
/// 2. Trim leading and trailing `/`
/// 3. Remove `docs_prefix` if the path starts with it on a segment boundary
/// 4. Trim separators again
/// 5. Substitute [`INDEX_NAME`] when nothing is left
///
/// Paths outside the prefix family are kept whole. Two URLs mapping to the same
/// output path overwrite each other.
///
/// # Examples
///
/// ```
/// use docs_mirror::url::resolve_output_path;
/// use url::Url;
///
/// let url = Url::parse("https://ai.google.dev/gemini-api/docs/models").unwrap();
/// assert_eq!(resolve_output_path(&url, "gemini-api/docs").as_str(), "models");
///
/// let root = Url::parse("https://ai.google.dev/gemini-api/docs/").unwrap();
/// assert_eq!(resolve_output_path(&root, "gemini-api/docs").as_str(), "index");
/// ```
pub fn resolve_output_path(url: &Url, docs_prefix: &str) -> OutputPath {
    let path = url.path().trim_matches('/');
    let prefix = docs_prefix.trim_matches('/');

    let remainder = strip_prefix_segments(path, prefix).trim_matches('/');

    OutputPath::new(remainder)
}

fn strip_prefix_segments<'a>(path: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return path;
    }

    match path.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}
