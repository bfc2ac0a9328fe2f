//! # pak3r Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin async wrappers around `tokio::fs` used by the `pack` pipeline:
//!
//! - **`is_file` / `is_dir`**: existence checks that never fail. Any
//!   metadata error (missing path, permissions) counts as "not there".
//! - **`read_file_to_string`**: reads a whole file, adding the path to the
//!   error context.
//! - **`recreate_dir`**: removes a directory tree if present and creates it
//!   again, empty. Returns the raw `io::Error` so callers can wrap it in
//!   their own error type.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Returns `true` if `path` exists and is a regular file (symlinks followed).
pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Returns `true` if `path` exists and is a directory (symlinks followed).
pub async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be opened or read, or is not UTF-8.
pub async fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file {:?}", path))
}

/// Deletes `path` recursively if it exists, then creates it (and any missing
/// parents) as an empty directory.
///
/// A file sitting at `path` is removed as well, so the result is always a
/// fresh directory.
pub async fn recreate_dir(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).await?;
            info!("Removed previous directory: {:?}", path);
        }
        Ok(_) => {
            fs::remove_file(path).await?;
            info!("Removed file in place of directory: {:?}", path);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No previous directory at {:?}", path);
        }
        Err(e) => return Err(e),
    }
    fs::create_dir_all(path).await?;
    debug!("Created directory: {:?}", path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_is_file_and_is_dir() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a.txt");
        std::fs::write(&file_path, "hello")?;

        assert!(is_file(&file_path).await);
        assert!(!is_dir(&file_path).await);
        assert!(is_dir(base_dir.path()).await);
        assert!(!is_file(base_dir.path()).await);
        assert!(!is_file(&base_dir.path().join("missing")).await);
        assert!(!is_dir(&base_dir.path().join("missing")).await);
        Ok(())
    }

    #[tokio::test]
    async fn test_read_file_to_string() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("r.txt");
        std::fs::write(&file_path, "content")?;
        assert_eq!(read_file_to_string(&file_path).await?, "content");
        assert!(read_file_to_string(&base_dir.path().join("nope"))
            .await
            .is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_recreate_dir_clears_previous_contents() -> Result<()> {
        let base_dir = tempdir()?;
        let out = base_dir.path().join("dist");
        std::fs::create_dir_all(out.join("nested"))?;
        std::fs::write(out.join("old.pk3"), "old")?;
        std::fs::write(out.join("nested/deep.txt"), "deep")?;

        recreate_dir(&out).await?;

        assert!(out.is_dir());
        assert_eq!(std::fs::read_dir(&out)?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_recreate_dir_creates_missing() -> Result<()> {
        let base_dir = tempdir()?;
        let out = base_dir.path().join("dist");
        recreate_dir(&out).await?;
        assert!(out.is_dir());
        Ok(())
    }

    #[tokio::test]
    async fn test_recreate_dir_replaces_file() -> Result<()> {
        let base_dir = tempdir()?;
        let out = base_dir.path().join("dist");
        std::fs::write(&out, "not a dir")?;
        recreate_dir(&out).await?;
        assert!(out.is_dir());
        Ok(())
    }
}
