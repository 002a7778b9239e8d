//! Path resolution for the mcphub data directory and database file.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Root of the mcphub data directory (`<local data dir>/mcphub`).
pub fn data_root() -> Result<PathBuf, PathError> {
    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join("mcphub"))
}

/// Path to the mcphub database file, creating the data directory if needed.
pub fn database_path() -> Result<PathBuf, PathError> {
    let root = data_root()?;

    fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
        path: root.clone(),
        reason: e.to_string(),
    })?;

    Ok(root.join("mcphub.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_ends_with_mcphub_db() {
        let path = database_path().unwrap();
        assert!(path.to_string_lossy().ends_with("mcphub.db"));
    }
}
