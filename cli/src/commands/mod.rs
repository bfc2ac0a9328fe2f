//! # pak3r Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the pak3r CLI and makes
//! them available to `main.rs`. Each command module defines its own clap
//! arguments struct and an async `handle_*` function.
//!
//! ## Commands
//!
//! - `pack`: packs the current project into `dist/A4T1-<name>.pk3`.
//!

/// The `pack` command: validate, prepare output, build the archive, report.
pub mod pack;
