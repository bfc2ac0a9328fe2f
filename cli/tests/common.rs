//! # pak3r CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: a command
//! builder for the compiled `pak3r` binary and a scratch project factory.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns an `assert_cmd::Command` for the `pak3r` binary under test.
pub fn pak3r_cmd() -> Command {
    Command::cargo_bin("pak3r").expect("Failed to find pak3r binary for testing")
}

/// Creates a temporary project with `package.json` (name `widget`) and a
/// `src/` folder holding `files` (relative path, contents).
pub fn widget_project(files: &[(&str, &[u8])]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp project");
    fs::write(dir.path().join("package.json"), r#"{"name":"widget"}"#)
        .expect("Failed to write package.json");
    fs::create_dir(dir.path().join("src")).expect("Failed to create src");
    for (path, contents) in files {
        write_file(&dir.path().join("src").join(path), contents);
    }
    dir
}

/// Writes `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, contents).expect("Failed to write file");
}
