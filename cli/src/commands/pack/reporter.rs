//! # Completion Reporter
//!
//! File: cli/src/commands/pack/reporter.rs
//!
//! ## Overview
//!
//! The archive builder runs on a blocking thread and talks to the rest of the
//! pipeline only through `ArchiveEvent`s. This module listens to those events
//! and turns them into one `PackOutcome`.
//!
//! ## State Machine
//!
//! ```text
//! Running --Closed{bytes}--> Succeeded{bytes}
//! Running --Error(cause)---> Failed{cause}
//! Running --channel closed-> Failed{"ended without completing"}
//! ```
//!
//! `EntryWritten`, `EntrySkipped` and `Drained` are informational and never
//! change the state. Once a terminal state is reached every later event is
//! ignored, so a run resolves exactly once.
//!
use crate::common::archive::zip::ArchiveEvent;
use crate::core::error::PakError;
use anyhow::anyhow;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

/// Final result of one packaging run.
#[derive(Debug)]
pub enum PackOutcome {
    Succeeded { bytes: u64 },
    Failed { cause: anyhow::Error },
}

/// Running tallies kept alongside the outcome.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PackStats {
    pub entries_written: usize,
    pub entries_skipped: usize,
}

#[derive(Debug)]
enum ReporterState {
    Running,
    Done(PackOutcome),
}

/// Folds archive events into a single outcome, printing progress lines.
#[derive(Debug)]
pub struct CompletionReporter {
    state: ReporterState,
    stats: PackStats,
    quiet: bool,
}

impl Default for CompletionReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionReporter {
    pub fn new() -> Self {
        Self {
            state: ReporterState::Running,
            stats: PackStats::default(),
            quiet: false,
        }
    }

    /// A reporter that does not print to stdout.
    #[cfg(test)]
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new()
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, ReporterState::Done(_))
    }

    #[cfg(test)]
    pub fn stats(&self) -> PackStats {
        self.stats
    }

    /// Applies one event. Returns `true` if this event resolved the run.
    pub fn observe(&mut self, event: ArchiveEvent) -> bool {
        if self.is_resolved() {
            debug!("Ignoring event after resolution: {:?}", event);
            return false;
        }
        match event {
            ArchiveEvent::EntryWritten { name } => {
                debug!("Entry written: {}", name);
                self.stats.entries_written += 1;
                false
            }
            ArchiveEvent::EntrySkipped { path, reason } => {
                debug!("Entry skipped: {} ({})", path.display(), reason);
                self.stats.entries_skipped += 1;
                false
            }
            ArchiveEvent::Drained => {
                self.say("Data has been drained");
                false
            }
            ArchiveEvent::Closed { bytes } => {
                self.say(&format!("{} total bytes", bytes));
                self.say("archive has been finalized and the output file has been closed.");
                self.state = ReporterState::Done(PackOutcome::Succeeded { bytes });
                true
            }
            ArchiveEvent::Error(cause) => {
                self.state = ReporterState::Done(PackOutcome::Failed { cause });
                true
            }
        }
    }

    /// Consumes events until the run resolves or the channel closes.
    pub async fn supervise(mut self, mut events: UnboundedReceiver<ArchiveEvent>) -> (PackOutcome, PackStats) {
        while let Some(event) = events.recv().await {
            if self.observe(event) {
                break;
            }
        }
        self.finish()
    }

    /// Returns the outcome. A reporter that never saw a terminal event
    /// resolves as failed.
    pub fn finish(self) -> (PackOutcome, PackStats) {
        let outcome = match self.state {
            ReporterState::Done(outcome) => outcome,
            ReporterState::Running => PackOutcome::Failed {
                cause: anyhow!(PakError::Stream(
                    "archive stream ended without completing".to_string()
                )),
            },
        };
        (outcome, self.stats)
    }

    fn say(&self, line: &str) {
        if !self.quiet {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_closed_resolves_succeeded() {
        let mut reporter = CompletionReporter::quiet();
        assert!(!reporter.observe(ArchiveEvent::EntryWritten {
            name: "manifest.json".into()
        }));
        assert!(!reporter.observe(ArchiveEvent::Drained));
        assert!(!reporter.is_resolved());
        assert!(reporter.observe(ArchiveEvent::Closed { bytes: 321 }));

        let (outcome, stats) = reporter.finish();
        assert!(matches!(outcome, PackOutcome::Succeeded { bytes: 321 }));
        assert_eq!(stats.entries_written, 1);
    }

    #[test]
    fn test_skipped_entry_is_not_terminal() {
        let mut reporter = CompletionReporter::quiet();
        assert!(!reporter.observe(ArchiveEvent::EntrySkipped {
            path: PathBuf::from("src/gone.txt"),
            reason: "No such file or directory".into(),
        }));
        assert!(!reporter.is_resolved());
        assert_eq!(reporter.stats().entries_skipped, 1);
    }

    #[test]
    fn test_error_resolves_failed() {
        let mut reporter = CompletionReporter::quiet();
        assert!(reporter.observe(ArchiveEvent::Error(anyhow!(PakError::Stream(
            "boom".into()
        )))));
        let (outcome, _) = reporter.finish();
        match outcome {
            PackOutcome::Failed { cause } => {
                assert_eq!(cause.to_string(), "Archive stream error: boom")
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_resolves_only_once() {
        let mut reporter = CompletionReporter::quiet();
        assert!(reporter.observe(ArchiveEvent::Closed { bytes: 10 }));
        assert!(!reporter.observe(ArchiveEvent::Error(anyhow!("late"))));
        assert!(!reporter.observe(ArchiveEvent::Closed { bytes: 99 }));
        let (outcome, _) = reporter.finish();
        assert!(matches!(outcome, PackOutcome::Succeeded { bytes: 10 }));
    }

    #[test]
    fn test_unresolved_finish_is_failure() {
        let (outcome, _) = CompletionReporter::quiet().finish();
        assert!(matches!(outcome, PackOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_supervise_stops_at_first_terminal_event() {
        let (tx, rx) = unbounded_channel();
        tx.send(ArchiveEvent::EntryWritten { name: "a".into() }).unwrap();
        tx.send(ArchiveEvent::Error(anyhow!("first"))).unwrap();
        tx.send(ArchiveEvent::Closed { bytes: 1 }).unwrap();

        let (outcome, stats) = CompletionReporter::quiet().supervise(rx).await;
        match outcome {
            PackOutcome::Failed { cause } => assert_eq!(cause.to_string(), "first"),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(stats.entries_written, 1);
    }

    #[tokio::test]
    async fn test_supervise_channel_closed_early() {
        let (tx, rx) = unbounded_channel();
        tx.send(ArchiveEvent::Drained).unwrap();
        drop(tx);
        let (outcome, _) = CompletionReporter::quiet().supervise(rx).await;
        assert!(matches!(outcome, PackOutcome::Failed { .. }));
    }
}
