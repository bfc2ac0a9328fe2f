//! # Project Manifest
//!
//! File: cli/src/commands/pack/manifest.rs
//!
//! Reads the package name out of the project manifest (`package.json`).
//! Only `name` is consumed; every other field is ignored. The file is never
//! written, and the archive stores its raw bytes rather than this parsed
//! form.
//!
use crate::common::fs::io;
use crate::core::config::is_single_component;
use crate::core::error::{PakError, Result};
use anyhow::anyhow;
use serde::Deserialize;
use std::path::Path;

/// The parts of the manifest pak3r cares about.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
}

impl Manifest {
    /// Parses manifest JSON. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let invalid = |reason: String| {
            anyhow!(PakError::ManifestInvalid {
                path: path.to_path_buf(),
                reason,
            })
        };
        let manifest: Manifest = serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;
        if manifest.name.trim().is_empty() {
            return Err(invalid("\"name\" must not be empty".to_string()));
        }
        // The name becomes part of the archive file name.
        if !is_single_component(&manifest.name) {
            return Err(invalid(format!(
                "\"name\" '{}' cannot be used in a file name",
                manifest.name
            )));
        }
        Ok(manifest)
    }

    /// Reads and parses the manifest at `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = io::read_file_to_string(path).await.map_err(|e| {
            anyhow!(PakError::ManifestInvalid {
                path: path.to_path_buf(),
                reason: format!("{:#}", e),
            })
        })?;
        Self::parse(&content, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn path() -> PathBuf {
        PathBuf::from("package.json")
    }

    fn is_invalid(result: Result<Manifest>) -> bool {
        matches!(
            result.unwrap_err().downcast_ref::<PakError>(),
            Some(PakError::ManifestInvalid { .. })
        )
    }

    #[test]
    fn test_parse_name_ignores_other_fields() -> Result<()> {
        let manifest = Manifest::parse(
            r#"{"name":"widget","version":"1.2.3","dependencies":{"x":"^1"}}"#,
            &path(),
        )?;
        assert_eq!(manifest.name, "widget");
        Ok(())
    }

    #[test]
    fn test_missing_name_is_invalid() {
        assert!(is_invalid(Manifest::parse(r#"{"version":"1"}"#, &path())));
    }

    #[test]
    fn test_non_string_name_is_invalid() {
        assert!(is_invalid(Manifest::parse(r#"{"name":42}"#, &path())));
    }

    #[test]
    fn test_empty_name_is_invalid() {
        assert!(is_invalid(Manifest::parse(r#"{"name":"  "}"#, &path())));
    }

    #[test]
    fn test_name_with_separator_is_invalid() {
        assert!(is_invalid(Manifest::parse(
            r#"{"name":"@scope/widget"}"#,
            &path()
        )));
        assert!(is_invalid(Manifest::parse(r#"{"name":".."}"#, &path())));
    }

    #[test]
    fn test_malformed_json_is_invalid() {
        assert!(is_invalid(Manifest::parse("{name: widget", &path())));
    }

    #[tokio::test]
    async fn test_load_from_disk() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("package.json");
        std::fs::write(&file, r#"{"name":"gadget"}"#)?;
        assert_eq!(Manifest::load(&file).await?.name, "gadget");
        assert!(is_invalid(Manifest::load(&dir.path().join("missing.json")).await));
        Ok(())
    }
}
