//! # pak3r ZIP Archive Builder (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//!
//! ## Overview
//!
//! This module writes the `.pk3` archive: a plain ZIP file holding the
//! project manifest under a canonical name plus every file of the source
//! tree, flattened so that the source directory itself is not a path
//! segment inside the archive.
//!
//! ## Architecture
//!
//! An `ArchiveJob` describes one run. Building it happens in two steps:
//!
//! 1. `ArchiveJob::collect_entries` enumerates the source tree with
//!    `walkdir` and returns the manifest entry followed by the source entries
//!    sorted by their in-archive name.
//! 2. `ArchiveJob::write_archive` streams each entry through a
//!    `zip::ZipWriter` (Deflate, level 9) into a buffered file. Entries are
//!    copied in fixed-size chunks, so memory use does not grow with the
//!    archive.
//!
//! Progress is reported as `ArchiveEvent`s on an unbounded `tokio` channel.
//! The writer is synchronous and is meant to run on a blocking thread via
//! `spawn_archive_job`; the completion reporter on the other end of the
//! channel turns the events into a single outcome.
//!
//! Source files that disappear between enumeration and read are skipped with
//! an `EntrySkipped` event. Any other failure aborts the run and the partial
//! archive file is deleted.
//!
//! ## Usage
//!
//! ```rust
//! let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
//! let job = ArchiveJob::new(src, manifest, "manifest.json", target);
//! let handle = zip::spawn_archive_job(job, tx);
//! // hand `rx` to the completion reporter
//! ```
//!
use crate::core::error::{PakError, Result};
use anyhow::anyhow;
use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Highest Deflate level. Archives are always written at this level.
pub const MAX_COMPRESSION_LEVEL: i64 = 9;

const COPY_CHUNK_SIZE: usize = 64 * 1024;

/// Where an entry's bytes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The project manifest. Read failures are always fatal.
    Manifest,
    /// A file under the source directory. May be skipped if it vanished.
    Source,
}

/// One file to be stored in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub kind: EntryKind,
    /// Path on disk.
    pub source: PathBuf,
    /// Name inside the archive, `/`-separated.
    pub name: String,
}

/// Signals emitted while an archive is being built.
#[derive(Debug)]
pub enum ArchiveEvent {
    /// An entry was fully written.
    EntryWritten { name: String },
    /// A source file vanished before it could be read. Non-fatal.
    EntrySkipped { path: PathBuf, reason: String },
    /// All buffered archive bytes have been flushed to the output file.
    Drained,
    /// The output file is complete and closed.
    Closed { bytes: u64 },
    /// The run aborted. No further events follow.
    Error(anyhow::Error),
}

/// Sending half of the event channel.
pub type EventSender = UnboundedSender<ArchiveEvent>;

/// Description of a single packaging run.
#[derive(Debug, Clone)]
pub struct ArchiveJob {
    pub source_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest_entry: String,
    pub target: PathBuf,
    pub compression_level: i64,
}

impl ArchiveJob {
    /// Creates a job writing at the maximum compression level.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        manifest_path: impl Into<PathBuf>,
        manifest_entry: impl Into<String>,
        target: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            manifest_path: manifest_path.into(),
            manifest_entry: manifest_entry.into(),
            target: target.into(),
            compression_level: MAX_COMPRESSION_LEVEL,
        }
    }

    /// Returns the manifest entry followed by one entry per regular file
    /// under the source directory, sorted by in-archive name.
    ///
    /// Files or directories that vanish during the walk are reported as
    /// `EntrySkipped` and left out.
    ///
    /// # Errors
    ///
    /// Returns `PakError::EntryRead` for any walk error other than `NotFound`.
    pub fn collect_entries(&self, events: &EventSender) -> Result<Vec<ArchiveEntry>> {
        let mut sources = Vec::new();
        for item in WalkDir::new(&self.source_dir).min_depth(1).follow_links(true) {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.source_dir.clone());
                    let source: io::Error = err.into();
                    if source.kind() == io::ErrorKind::NotFound {
                        skip_entry(events, path, &source);
                        continue;
                    }
                    return Err(anyhow!(PakError::EntryRead { path, source }));
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.source_dir)
                .map_err(|e| anyhow!(PakError::Stream(e.to_string())))?;
            sources.push(ArchiveEntry {
                kind: EntryKind::Source,
                source: entry.path().to_path_buf(),
                name: archive_name(relative),
            });
        }
        sources.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(
            "Collected {} source entries under {}",
            sources.len(),
            self.source_dir.display()
        );

        let mut entries = Vec::with_capacity(sources.len() + 1);
        entries.push(ArchiveEntry {
            kind: EntryKind::Manifest,
            source: self.manifest_path.clone(),
            name: self.manifest_entry.clone(),
        });
        entries.extend(sources);
        Ok(entries)
    }

    /// Writes `entries` to the target file in order and returns the size of
    /// the finished archive in bytes.
    ///
    /// The file is truncated to the end of the central directory, so an entry
    /// aborted after a partial copy leaves no trailing bytes. On failure the
    /// partially written target file is removed before the error is returned.
    pub fn write_archive(&self, entries: &[ArchiveEntry], events: &EventSender) -> Result<u64> {
        let result = self.write_entries(entries, events);
        if result.is_err() {
            self.discard_partial();
        }
        result
    }

    fn write_entries(&self, entries: &[ArchiveEntry], events: &EventSender) -> Result<u64> {
        let file = File::create(&self.target).map_err(|e| {
            anyhow!(PakError::Stream(format!(
                "cannot create {}: {}",
                self.target.display(),
                e
            )))
        })?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level))
            .unix_permissions(0o644);

        let mut buffer = vec![0u8; COPY_CHUNK_SIZE];
        for entry in entries {
            let mut reader = match File::open(&entry.source) {
                Ok(reader) => reader,
                Err(e) if vanished(entry, &e) => {
                    skip_entry(events, entry.source.clone(), &e);
                    continue;
                }
                Err(e) => {
                    return Err(anyhow!(PakError::EntryRead {
                        path: entry.source.clone(),
                        source: e,
                    }))
                }
            };

            zip.start_file(entry.name.as_str(), options)
                .map_err(|e| stream_error(&entry.name, e))?;
            match copy_entry(&mut reader, &mut zip, &mut buffer, entry)? {
                CopyResult::Complete(size) => {
                    debug!("Added {} ({} bytes)", entry.name, size);
                    let _ = events.send(ArchiveEvent::EntryWritten {
                        name: entry.name.clone(),
                    });
                }
                CopyResult::Vanished(e) => {
                    zip.abort_file()
                        .map_err(|err| stream_error(&entry.name, err))?;
                    skip_entry(events, entry.source.clone(), &e);
                }
            }
        }

        let writer = zip
            .finish()
            .map_err(|e| anyhow!(PakError::Stream(format!("cannot finalize archive: {}", e))))?;
        let mut file = writer
            .into_inner()
            .map_err(|e| anyhow!(PakError::Stream(format!("cannot flush archive: {}", e.error()))))?;
        let _ = events.send(ArchiveEvent::Drained);
        let bytes = truncate_at_position(&mut file)
            .map_err(|e| anyhow!(PakError::Stream(format!("cannot trim archive: {}", e))))?;
        file.sync_all()
            .map_err(|e| anyhow!(PakError::Stream(format!("cannot sync archive: {}", e))))?;
        info!("Wrote {} ({} bytes)", self.target.display(), bytes);
        Ok(bytes)
    }

    fn discard_partial(&self) {
        match std::fs::remove_file(&self.target) {
            Ok(()) => info!("Removed partial archive {}", self.target.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Could not remove partial archive {}: {}",
                self.target.display(),
                e
            ),
        }
    }
}

enum CopyResult {
    Complete(u64),
    Vanished(io::Error),
}

/// Streams one entry's bytes into the open ZIP entry. Read and write errors
/// are kept apart so that only read-side `NotFound` counts as a vanished file.
fn copy_entry<W: Write>(
    reader: &mut File,
    writer: &mut W,
    buffer: &mut [u8],
    entry: &ArchiveEntry,
) -> Result<CopyResult> {
    let mut total = 0u64;
    loop {
        let read = match reader.read(buffer) {
            Ok(0) => return Ok(CopyResult::Complete(total)),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if vanished(entry, &e) => return Ok(CopyResult::Vanished(e)),
            Err(e) => {
                return Err(anyhow!(PakError::EntryRead {
                    path: entry.source.clone(),
                    source: e,
                }))
            }
        };
        writer
            .write_all(&buffer[..read])
            .map_err(|e| stream_error(&entry.name, e))?;
        total += read as u64;
    }
}

/// Cuts `file` off at its current write position and returns the new length.
///
/// An aborted entry rewinds the writer without shrinking the file, so bytes
/// of a longer aborted entry could otherwise trail the central directory.
fn truncate_at_position(file: &mut File) -> io::Result<u64> {
    let end = file.stream_position()?;
    file.set_len(end)?;
    Ok(end)
}

fn vanished(entry: &ArchiveEntry, err: &io::Error) -> bool {
    entry.kind == EntryKind::Source && err.kind() == io::ErrorKind::NotFound
}

fn skip_entry(events: &EventSender, path: PathBuf, err: &io::Error) {
    warn!("Skipping {}: {}", path.display(), err);
    let _ = events.send(ArchiveEvent::EntrySkipped {
        path,
        reason: err.to_string(),
    });
}

fn stream_error(name: &str, err: impl std::fmt::Display) -> anyhow::Error {
    anyhow!(PakError::Stream(format!("entry '{}': {}", name, err)))
}

/// Joins the components of a path relative to the source root with `/`.
fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Runs a complete job on the current thread: collects entries, writes the
/// archive and finishes with either `Closed` or `Error` on `events`.
pub fn run_archive_job(job: &ArchiveJob, events: &EventSender) {
    let result = job
        .collect_entries(events)
        .and_then(|entries| job.write_archive(&entries, events));
    let _ = match result {
        Ok(bytes) => events.send(ArchiveEvent::Closed { bytes }),
        Err(e) => events.send(ArchiveEvent::Error(e)),
    };
}

/// Runs `job` on tokio's blocking thread pool.
pub fn spawn_archive_job(job: ArchiveJob, events: EventSender) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || run_archive_job(&job, &events))
}
