use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::safety::{validate_not_protected, validate_path};

pub fn ensure_dir(path: &Path) -> Result<(), AppError> {
    validate_path(&path.to_string_lossy())?;
    fs::create_dir_all(path)?;
    Ok(())
}

/// Permanently deletes a processed source folder and everything under it.
/// Destructive and irreversible; callers invoke this only after the folder's
/// export has been written.
pub fn remove_folder(path: &Path) -> Result<(), AppError> {
    let path_str = path.to_string_lossy();
    validate_path(&path_str)?;
    validate_not_protected(&path_str)?;

    if !path.is_dir() {
        return Err(AppError::General(format!("not a directory: {path_str}")));
    }

    fs::remove_dir_all(path)?;
    Ok(())
}
