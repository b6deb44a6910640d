//! Error types for corpus loading.
//!
//! Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Error types for corpus loading.
///
/// Missing or empty corpus folders are configuration errors surfaced to the
/// caller before any pipeline stage runs; unreadable individual files are
/// logged and skipped instead.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Documents folder does not exist or is not a directory.
    #[error("Documents folder not found: {0}")]
    FolderNotFound(String),

    /// Documents folder exists but contains no loadable documents.
    #[error("No documents found in {0}")]
    Empty(String),

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),
}
