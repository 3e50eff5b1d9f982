//! Document persistence
//!
//! Documents are written under the output root at their derived path. Parent
//! directories are created right before each write.

use crate::url::OutputPath;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing a document
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Output path '{0}' escapes the output root")]
    UnsafePath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Ensures the directory that will hold `file` exists
///
/// Idempotent; does nothing when the directory is already there.
pub async fn ensure_parent_dirs(file: &Path) -> OutputResult<()> {
    if let Some(parent) = file.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Writes a document to `root` at the file derived from `path`
///
/// # Arguments
///
/// * `root` - The output root directory
/// * `path` - The page's output path
/// * `contents` - UTF-8 text written verbatim
///
/// # Returns
///
/// * `Ok(PathBuf)` - The file that was written
/// * `Err(OutputError)` - The path is unsafe or the write failed
pub async fn write_document(
    root: &Path,
    path: &OutputPath,
    contents: &str,
) -> OutputResult<PathBuf> {
    check_relative(path)?;

    let file = path.to_file_path(root);
    ensure_parent_dirs(&file).await?;
    tokio::fs::write(&file, contents).await?;

    Ok(file)
}

/// Rejects paths with segments that could leave the output root
fn check_relative(path: &OutputPath) -> OutputResult<()> {
    let unsafe_segment = path.document_path().split('/').any(|segment| {
        segment == "." || segment == ".." || segment.contains('\\') || segment.contains('\0')
    });

    if unsafe_segment {
        return Err(OutputError::UnsafePath(path.as_str().to_string()));
    }

    Ok(())
}
