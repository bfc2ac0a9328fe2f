//! # pak3r Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by every command:
//! - `config`: layout and naming defaults, with `.pak3r.toml` overrides
//! - `error`: the `PakError` taxonomy and the `Result` alias
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{PakError, Result};
//! ```
//!
pub mod config;
pub mod error;
