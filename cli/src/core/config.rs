//! # pak3r Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module holds the names that define a packageable project: where the
//! manifest and source tree live, where the archive is written and how it is
//! named. Every value has a built-in default, so most projects need no
//! configuration at all.
//!
//! A project may override the defaults with a `.pak3r.toml` file in its root:
//!
//! ```toml
//! [layout]
//! manifest = "package.json"
//! source_dir = "src"
//! output_dir = "dist"
//!
//! [archive]
//! prefix = "A4T1"
//! extension = "pk3"
//! manifest_entry = "manifest.json"
//! ```
//!
//! ## Architecture
//!
//! - The file is looked up in the explicit project root handed to
//!   `load_config`, never in the process working directory.
//! - Unknown keys are rejected (`deny_unknown_fields`).
//! - After parsing, `validate_config` checks that every name is a single,
//!   non-empty path component.
//!
//! The compression level is deliberately absent: archives are always written
//! at the maximum Deflate level.
//!
use crate::common::fs::io;
use crate::core::error::{PakError, Result};
use anyhow::anyhow;
use serde::Deserialize;
use std::path::{Component, Path};
use tracing::{debug, info};

/// Name of the optional per-project configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".pak3r.toml";

/// Top-level configuration, loaded from `.pak3r.toml` or defaulted.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Where things live inside the project root.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Manifest file name, relative to the project root.
    #[serde(default = "default_manifest")]
    pub manifest: String,
    /// Source directory whose contents are packed.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Output directory. Deleted and recreated on every run.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// How the archive and its manifest entry are named.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Fixed prefix of the archive file name.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Archive file extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Name the manifest is stored under inside the archive.
    #[serde(default = "default_manifest_entry")]
    pub manifest_entry: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            extension: default_extension(),
            manifest_entry: default_manifest_entry(),
        }
    }
}

fn default_manifest() -> String {
    "package.json".to_string()
}
fn default_source_dir() -> String {
    "src".to_string()
}
fn default_output_dir() -> String {
    "dist".to_string()
}
fn default_prefix() -> String {
    "A4T1".to_string()
}
fn default_extension() -> String {
    "pk3".to_string()
}
fn default_manifest_entry() -> String {
    "manifest.json".to_string()
}

/// Loads the configuration for the project rooted at `root`.
///
/// Returns the defaults when `root` has no `.pak3r.toml`.
///
/// # Errors
///
/// Returns an `Err` if the file exists but cannot be read or parsed, or if a
/// configured name fails validation.
pub async fn load_config(root: &Path) -> Result<PackConfig> {
    let config_path = root.join(PROJECT_CONFIG_FILENAME);
    let config = if io::is_file(&config_path).await {
        info!(
            "Loading project configuration from: {}",
            config_path.display()
        );
        load_config_from_path(&config_path).await?
    } else {
        debug!(
            "No {} in {}, using defaults.",
            PROJECT_CONFIG_FILENAME,
            root.display()
        );
        PackConfig::default()
    };
    validate_config(&config)?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

async fn load_config_from_path(path: &Path) -> Result<PackConfig> {
    let content = io::read_file_to_string(path)
        .await
        .map_err(|e| anyhow!(PakError::Config(format!("{:#}", e))))?;
    toml::from_str(&content).map_err(|e| {
        anyhow!(PakError::Config(format!(
            "Failed to parse {}: {}",
            path.display(),
            e
        )))
    })
}

fn validate_config(config: &PackConfig) -> Result<()> {
    let names = [
        ("layout.manifest", &config.layout.manifest),
        ("layout.source_dir", &config.layout.source_dir),
        ("layout.output_dir", &config.layout.output_dir),
        ("archive.prefix", &config.archive.prefix),
        ("archive.extension", &config.archive.extension),
        ("archive.manifest_entry", &config.archive.manifest_entry),
    ];
    for (key, value) in names {
        if !is_single_component(value) {
            return Err(anyhow!(PakError::Config(format!(
                "'{}' must be a single non-empty file name, got '{}'",
                key, value
            ))));
        }
    }
    if config.layout.output_dir == config.layout.source_dir {
        return Err(anyhow!(PakError::Config(format!(
            "output_dir and source_dir must differ (both '{}')",
            config.layout.output_dir
        ))));
    }
    Ok(())
}

/// True when `name` is exactly one normal path component (no separators,
/// not `.` or `..`).
pub(crate) fn is_single_component(name: &str) -> bool {
    if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
