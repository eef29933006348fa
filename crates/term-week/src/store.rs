//! JSON persistence for compiled tables.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::table::TermTable;

/// Write `table` to `path` as pretty-printed JSON, replacing any existing
/// file.
pub fn save(table: &TermTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = table.to_json()?;
    fs::write(path, json)?;
    debug!(path = %path.display(), terms = table.len(), "term table saved");
    Ok(())
}

/// Read and re-validate a table written by [`save`].
///
/// # Errors
///
/// [`crate::TermError::Io`] if the file cannot be read,
/// [`crate::TermError::Store`] if it is not a consistent table.
pub fn load(path: impl AsRef<Path>) -> Result<TermTable> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let table = TermTable::from_json(&json)?;
    debug!(path = %path.display(), terms = table.len(), "term table loaded");
    Ok(table)
}
