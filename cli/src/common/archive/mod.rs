//! # pak3r Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Archive writing for pak3r. A `.pk3` is an ordinary ZIP file, so the only
//! submodule is `zip`:
//!
//! - **`zip`**: builds the archive from an `ArchiveJob` (manifest entry plus
//!   the flattened source tree), streaming at maximum Deflate level and
//!   reporting progress as `ArchiveEvent`s.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::zip::{self, ArchiveJob};
//!
//! let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
//! let job = ArchiveJob::new(src_dir, manifest_path, "manifest.json", target);
//! zip::spawn_archive_job(job, tx);
//! ```
//!

pub mod zip;
