//! # pak3r Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the `pack` pipeline. Everything lives in the
//! `io` submodule for now; import from it directly:
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! if io::is_dir(&src).await {
//!     io::recreate_dir(&dist).await?;
//! }
//! ```
//!

/// Async existence checks, file reads and directory recreation.
pub mod io;
