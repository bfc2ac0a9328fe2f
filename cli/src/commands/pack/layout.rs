//! # Project Layout Validation
//!
//! File: cli/src/commands/pack/layout.rs
//!
//! Confirms that a directory looks like a packageable project: the manifest
//! file and the source directory both exist. This only inspects the
//! filesystem and never writes to it.
//!
use crate::common::fs::io;
use crate::core::config::LayoutConfig;
use crate::core::error::{PakError, Result};
use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A project directory that passed layout validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    root: PathBuf,
    manifest: PathBuf,
    source_dir: PathBuf,
}

impl ProjectRoot {
    /// Validates `root` against `layout`.
    ///
    /// Relative paths are resolved against the process working directory.
    ///
    /// # Errors
    ///
    /// `PakError::MissingManifest` if the manifest is not a file,
    /// `PakError::MissingSourceTree` if the source directory is not a
    /// directory. The manifest is checked first.
    pub async fn validate(root: &Path, layout: &LayoutConfig) -> Result<Self> {
        let root = std::path::absolute(root)
            .with_context(|| format!("Failed to resolve project root {:?}", root))?;
        let manifest = root.join(&layout.manifest);
        let source_dir = root.join(&layout.source_dir);

        if !io::is_file(&manifest).await {
            bail!(PakError::MissingManifest { path: manifest });
        }
        if !io::is_dir(&source_dir).await {
            bail!(PakError::MissingSourceTree { path: source_dir });
        }
        debug!("Validated project root {}", root.display());
        Ok(Self {
            root,
            manifest,
            source_dir,
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}
