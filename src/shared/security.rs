use crate::shared::error::AppError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum catalog file size (100 MB)
pub const MAX_CATALOG_SIZE: u64 = 100 * 1024 * 1024;

/// Reads a catalog file after checking that it is a regular file within the size cap.
///
/// # Security
/// Uses `symlink_metadata()` so that a symbolic link is rejected rather than followed.
///
/// # Errors
/// Returns an error if:
/// - The metadata cannot be read
/// - The path is a symbolic link or not a regular file
/// - The file is larger than [`MAX_CATALOG_SIZE`]
pub fn read_regular_file(path: &Path) -> Result<String> {
    let metadata = fs::symlink_metadata(path).map_err(|e| AppError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    reject_symlink(path, &metadata, "read")?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > MAX_CATALOG_SIZE {
        return Err(AppError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                metadata.len(),
                MAX_CATALOG_SIZE
            ),
            hint: "Split the catalog into smaller files".to_string(),
        }
        .into());
    }

    fs::read_to_string(path).map_err(|e| {
        AppError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Checks that `path` can be written: its parent exists and, if the file
/// already exists, it is not a symbolic link.
pub fn validate_write_target(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if parent != Path::new("") && !parent.exists() {
            return Err(AppError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Parent directory does not exist: {}", parent.display()),
            }
            .into());
        }
    }

    if let Ok(metadata) = fs::symlink_metadata(path) {
        reject_symlink(path, &metadata, "write")?;
    }

    Ok(())
}

fn reject_symlink(path: &Path, metadata: &fs::Metadata, operation: &str) -> Result<()> {
    if metadata.is_symlink() {
        return Err(AppError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} operations on symbolic links are not allowed",
                operation
            ),
            hint: "Point to the real catalog file instead of a link".to_string(),
        }
        .into());
    }
    Ok(())
}
