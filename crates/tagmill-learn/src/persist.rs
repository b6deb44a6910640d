//! Weight-table persistence with atomic JSON writes.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use tagmill_types::WeightTable;

/// Write text content atomically:
/// - ensure parent directory exists
/// - write to a temp file in the same directory
/// - fsync file + rename into place
pub(crate) fn atomic_write_text(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory for persistence path {}",
            path.display()
        )
    })?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("state.json");
    let temp_name = format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4());
    let temp_path = parent.join(temp_name);

    let mut temp_file = std::fs::File::create(&temp_path).with_context(|| {
        format!(
            "failed to create temporary persistence file {}",
            temp_path.display()
        )
    })?;
    temp_file
        .write_all(content.as_bytes())
        .with_context(|| format!("failed to write temporary file {}", temp_path.display()))?;
    temp_file
        .sync_all()
        .with_context(|| format!("failed to fsync temporary file {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path).with_context(|| {
        format!(
            "failed to rename temporary file {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

/// Save a weight table to a JSON file, replacing any previous table.
///
/// # Errors
///
/// Returns an error if the table cannot be serialized or written to disk.
pub fn save_weight_table(table: &WeightTable, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;
    atomic_write_text(path, &json)?;
    log::info!(
        "Saved weight table with {} entries to {}",
        table.len(),
        path.display()
    );
    Ok(())
}

/// Load a weight table from a JSON file.
///
/// An absent file is not an error: it loads as an empty table, so every tag
/// weighs the default 1.0 on the first run.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_weight_table(path: &Path) -> Result<WeightTable> {
    if !path.exists() {
        log::info!("No existing weight table at {}", path.display());
        return Ok(WeightTable::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read weight table {}", path.display()))?;
    let table: WeightTable = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse weight table {}", path.display()))?;
    log::info!(
        "Loaded {} weight table entries from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}
