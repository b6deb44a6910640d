//! Run-artifact persistence.
//!
//! Tags and feedback artifacts are JSON collections written atomically
//! (temp file in the target directory, fsync, rename) so a failed run never
//! leaves a truncated artifact behind. The weight table has its own
//! persistence in `tagmill-learn`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize a value to pretty JSON and write it atomically.
///
/// # Errors
///
/// Returns an error when serialization or any filesystem step fails.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize artifact {}", path.display()))?;

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create output directory {}", parent.display()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("artifact.json");
    let temp_path = parent.join(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    let mut temp_file = std::fs::File::create(&temp_path)
        .with_context(|| format!("failed to create temporary file {}", temp_path.display()))?;
    temp_file
        .write_all(json.as_bytes())
        .with_context(|| format!("failed to write temporary file {}", temp_path.display()))?;
    temp_file
        .sync_all()
        .with_context(|| format!("failed to fsync temporary file {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("failed to rename into place {}", path.display()))?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Read a JSON artifact produced by an earlier stage.
///
/// # Errors
///
/// Returns an error when the file is missing, unreadable, or malformed.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read artifact {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse artifact {}", path.display()))
}
