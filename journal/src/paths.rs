use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{JournalError, JournalResult};

/// Get the path of the journal file under the user data directory
pub fn get_journal_path() -> JournalResult<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        JournalError::StorageError("Could not determine user data directory".to_string())
    })?;

    Ok(data_dir.join("mealroast").join("journal.json"))
}

/// Ensure the directory holding the journal file exists
pub fn ensure_journal_dir(path: &Path) -> JournalResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            JournalError::StorageError(format!("Failed to create journal directory: {}", e))
        })?;
    }
    Ok(())
}
