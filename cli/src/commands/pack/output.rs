//! # Output Preparation
//!
//! File: cli/src/commands/pack/output.rs
//!
//! Clears the output directory and works out where the archive goes. Any
//! previous contents of the output directory are deleted, so repeated runs
//! replace earlier results instead of adding to them.
//!
use super::layout::ProjectRoot;
use super::manifest::Manifest;
use crate::common::fs::io;
use crate::core::config::PackConfig;
use crate::core::error::{PakError, Result};
use anyhow::anyhow;
use std::path::{Path, PathBuf};
use tracing::info;

/// A freshly recreated output directory and the archive path inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedOutput {
    pub dir: PathBuf,
    pub archive: PathBuf,
}

/// `<prefix>-<name>.<extension>`, e.g. `A4T1-widget.pk3`.
pub fn archive_file_name(config: &PackConfig, manifest: &Manifest) -> String {
    format!(
        "{}-{}.{}",
        config.archive.prefix, manifest.name, config.archive.extension
    )
}

/// Recreates the output directory under `root` and returns the archive path.
///
/// # Errors
///
/// `PakError::OutputPrepFailed` if the old directory cannot be removed or
/// the new one cannot be created. The old directory may already be gone
/// when this happens.
pub async fn prepare_output(
    root: &ProjectRoot,
    config: &PackConfig,
    manifest: &Manifest,
) -> Result<PreparedOutput> {
    let dir = root.path().join(&config.layout.output_dir);
    recreate(&dir).await?;
    let archive = dir.join(archive_file_name(config, manifest));
    info!("Archive will be written to {}", archive.display());
    Ok(PreparedOutput { dir, archive })
}

async fn recreate(dir: &Path) -> Result<()> {
    io::recreate_dir(dir).await.map_err(|source| {
        anyhow!(PakError::OutputPrepFailed {
            path: dir.to_path_buf(),
            source,
        })
    })
}
