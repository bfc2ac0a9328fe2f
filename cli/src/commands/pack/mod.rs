//! # pak3r Pack Command
//!
//! File: cli/src/commands/pack/mod.rs
//!
//! ## Overview
//!
//! `pak3r pack` turns the project in the current directory into a `.pk3`
//! archive in its output directory. With the default layout:
//!
//! ```text
//! package.json      ->  dist/A4T1-<name>.pk3
//! src/**                  ├── manifest.json   (raw bytes of package.json)
//!                         └── <files of src/, without the src/ prefix>
//! ```
//!
//! ## Architecture
//!
//! The command is a straight pipeline. Each stage only starts once the
//! previous one succeeded:
//!
//! 1. `core::config::load_config` reads optional `.pak3r.toml` overrides.
//! 2. `layout::ProjectRoot::validate` checks that the manifest and source
//!    directory exist. Nothing has been written yet.
//! 3. `manifest::Manifest::load` reads the package name.
//! 4. `output::prepare_output` deletes and recreates the output directory
//!    and computes the archive path.
//! 5. `common::archive::zip::spawn_archive_job` writes the archive on a
//!    blocking thread.
//! 6. `reporter::CompletionReporter` waits for the builder's events and
//!    resolves the run as succeeded or failed.
//!
//! The project root is passed explicitly through every stage; only
//! `handle_pack` looks at the process working directory.
//!
use crate::common::archive::zip::{self, ArchiveJob};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::unbounded_channel;
use tracing::{error, info};

pub mod layout;
pub mod manifest;
pub mod output;
pub mod reporter;

use layout::ProjectRoot;
use manifest::Manifest;
use reporter::{CompletionReporter, PackOutcome, PackStats};

/// Turns the current package into a pk3 and puts it in the dist folder.
///
/// `pack` takes no arguments; it always packs the current directory.
#[derive(Parser, Debug)]
pub struct PackArgs {}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackReport {
    pub archive: PathBuf,
    pub bytes: u64,
    pub stats: PackStats,
}

/// # Handle Pack Command (`handle_pack`)
///
/// Entry point for `pak3r pack`. Resolves the working directory and runs
/// the pipeline against it, printing progress to stdout.
pub async fn handle_pack(_args: PackArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    println!("CWD: {}", cwd.display());
    let report = pack(&cwd, CompletionReporter::new()).await?;
    info!(
        "Packed {} entries into {} ({} bytes, {} skipped)",
        report.stats.entries_written,
        report.archive.display(),
        report.bytes,
        report.stats.entries_skipped
    );
    Ok(())
}

/// Packs the project at `root`.
///
/// # Errors
///
/// Returns the first fatal error of any stage: a precondition, config or
/// manifest error (nothing written), `OutputPrepFailed`, or the cause that
/// the completion reporter resolved the archive run with.
pub async fn pack(root: &Path, reporter: CompletionReporter) -> Result<PackReport> {
    let config = config::load_config(root).await?;
    let project = ProjectRoot::validate(root, &config.layout).await?;
    let manifest = Manifest::load(project.manifest()).await?;
    let prepared = output::prepare_output(&project, &config, &manifest).await?;

    let job = ArchiveJob::new(
        project.source_dir(),
        project.manifest(),
        &config.archive.manifest_entry,
        &prepared.archive,
    );
    let (tx, rx) = unbounded_channel();
    let builder = zip::spawn_archive_job(job, tx);
    let (outcome, stats) = reporter.supervise(rx).await;
    if let Err(e) = builder.await {
        error!("Archive builder task did not finish cleanly: {}", e);
    }

    match outcome {
        PackOutcome::Succeeded { bytes } => Ok(PackReport {
            archive: prepared.archive,
            bytes,
            stats,
        }),
        PackOutcome::Failed { cause } => Err(cause),
    }
}
