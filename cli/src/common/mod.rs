//! # pak3r Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities that the command modules build on, kept apart from
//! command logic (`commands::`) and core infrastructure (`core::`).
//!
//! - **`archive`**: writes ZIP (`.pk3`) archives from a list of entries.
//! - **`fs`**: async filesystem helpers (existence checks, directory
//!   recreation).
//!

/// Archive writing (ZIP / `.pk3`).
pub mod archive;
/// Filesystem helpers.
pub mod fs;
