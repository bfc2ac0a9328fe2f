//! # pak3r Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout pak3r. Errors fall
//! into four classes, matching the stages of the `pack` pipeline:
//!
//! - **Precondition** (`MissingManifest`, `MissingSourceTree`): the working
//!   directory is not a packageable project. Raised before any output exists.
//! - **Output preparation** (`OutputPrepFailed`): the output directory could
//!   not be cleared or recreated. The old directory may already be gone.
//! - **Entry read** (`EntryRead`): a source file could not be read. When the
//!   underlying I/O error is `NotFound` the builder treats it as a vanished
//!   file and skips the entry; any other kind is fatal.
//! - **Stream** (`Stream`): the ZIP writer or the output file failed.
//!
//! `Config` and `ManifestInvalid` cover the inputs read before packaging.
//!
//! ## Architecture
//!
//! - `PakError`: a `thiserror` enum carrying the specific failure.
//! - `Result<T>`: an alias for `anyhow::Result<T>`, so callers can attach
//!   context with `anyhow::Context` and still recover the typed error with
//!   `downcast_ref::<PakError>()`.
//!
//! ## Examples
//!
//! ```rust
//! if !manifest.is_file() {
//!     anyhow::bail!(PakError::MissingManifest { path: manifest });
//! }
//!
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<PakError>(), Some(PakError::MissingManifest { .. })) => {
//!         // not a project directory
//!     }
//!     _ => {}
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for pak3r.
#[derive(Error, Debug)]
pub enum PakError {
    #[error("{} not found", path.display())]
    MissingManifest { path: PathBuf },

    #[error("{} folder not found", path.display())]
    MissingSourceTree { path: PathBuf },

    #[error("Invalid manifest {}: {reason}", path.display())]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to prepare output directory {}: {source}", path.display())]
    OutputPrepFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read archive entry {}: {source}", path.display())]
    EntryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive stream error: {0}")]
    Stream(String),
}

impl PakError {
    /// True for the pre-flight failures raised before any output is written.
    #[cfg(test)]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            PakError::MissingManifest { .. } | PakError::MissingSourceTree { .. }
        )
    }
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;
