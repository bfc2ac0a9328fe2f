//! # pak3r CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Verifies the top-level behavior of the `pak3r` binary: `--help`,
//! `--version`, and rejection of unknown subcommands.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_flag_lists_pack() {
    pak3r_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pack"));
}

#[test]
fn test_version_flag() {
    pak3r_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_pack_help() {
    pak3r_cmd()
        .args(["pack", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pk3"));
}

#[test]
fn test_unknown_subcommand_fails() {
    pak3r_cmd()
        .arg("unpack")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_no_subcommand_fails() {
    pak3r_cmd().assert().failure();
}
