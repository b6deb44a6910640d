//! Document discovery and loading.
//!
//! Reads a flat folder of plain-text documents into normalized in-memory
//! records. Hidden, oversized and binary files are filtered out; individual
//! unreadable files are logged and skipped rather than aborting the run.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use tagmill_types::Document;

use crate::error::CorpusError;

/// Options for corpus loading.
#[derive(Debug, Clone)]
pub struct CorpusOptions {
    /// File extensions to include, lowercase with dot prefix.
    pub extensions: Vec<String>,
    /// Maximum file size in bytes (default: 1MB).
    pub max_file_size: u64,
    /// Skip hidden files.
    pub skip_hidden: bool,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            extensions: vec![".txt".to_string(), ".md".to_string()],
            max_file_size: 1024 * 1024, // 1MB
            skip_hidden: true,
        }
    }
}

/// Load all matching documents from a folder, sorted by filename.
///
/// Each document is tokenized at load so the generator and the feedback
/// synthesizer share one normalized term sequence.
///
/// # Errors
///
/// Returns `CorpusError::FolderNotFound` when the folder is missing and
/// `CorpusError::Empty` when no loadable document remains after filtering.
pub fn load_documents(folder: &Path, options: &CorpusOptions) -> Result<Vec<Document>, CorpusError> {
    if !folder.is_dir() {
        return Err(CorpusError::FolderNotFound(folder.display().to_string()));
    }

    let extensions: Vec<String> = options
        .extensions
        .iter()
        .map(|e| normalize_extension(e))
        .collect();

    let mut documents = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if options.skip_hidden && filename.starts_with('.') {
            continue;
        }

        if !matches_extension(path, &extensions) {
            continue;
        }

        match entry.metadata() {
            Ok(meta) if meta.len() > options.max_file_size => {
                log::warn!(
                    "Skipping {filename}: {} bytes exceeds limit of {}",
                    meta.len(),
                    options.max_file_size
                );
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Could not stat {filename}: {e}");
                continue;
            }
        }

        match read_text(path) {
            Ok(raw_text) => {
                let tokens = tagmill_text::tokenize(&raw_text);
                documents.push(Document::new(filename.to_string(), raw_text, tokens));
            }
            Err(e) => {
                log::warn!("Could not read {filename}: {e}");
            }
        }
    }

    if documents.is_empty() {
        return Err(CorpusError::Empty(folder.display().to_string()));
    }

    documents.sort_by(|a, b| a.filename.cmp(&b.filename));
    log::info!(
        "Loaded {} documents from {}",
        documents.len(),
        folder.display()
    );
    Ok(documents)
}

/// Quick binary detection - checks the first 8KB for NULL bytes.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = std::cmp::min(buffer.len(), 8192);
    buffer[..check_len].contains(&0)
}

/// Read a file as text, rejecting binary content and tolerating invalid
/// UTF-8 via lossy decoding.
fn read_text(path: &Path) -> Result<String, CorpusError> {
    let buffer = fs::read(path)?;
    if is_binary(&buffer) {
        return Err(CorpusError::System(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "binary file detected",
        )));
    }
    match String::from_utf8(buffer) {
        Ok(s) => Ok(s),
        Err(e) => Ok(String::from_utf8_lossy(&e.into_bytes()).into_owned()),
    }
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .is_some_and(|ext| extensions.contains(&ext))
}

/// Normalize extension to lowercase with dot prefix.
fn normalize_extension(ext: &str) -> String {
    let mut ext = ext.to_lowercase();
    if !ext.starts_with('.') {
        ext = format!(".{ext}");
    }
    ext
}
