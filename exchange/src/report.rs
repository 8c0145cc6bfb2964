//! Receive reports.

use std::fmt;

use fixity_core::FrameId;
use tracing::error;

/// An entry that could not be reconstructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    /// Index in the label/payload blocks; `None` for trailer failures.
    pub index: Option<usize>,
    /// The label that failed.
    pub label: String,
    /// Human-readable reason.
    pub reason: String,
}

impl fmt::Display for EntryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "entry {} '{}': {}", i, self.label, self.reason),
            None => write!(f, "trailer '{}': {}", self.label, self.reason),
        }
    }
}

/// Outcome of reconstructing one frame.
///
/// The frame is always fully consumed; failures are collected here so the
/// caller can decide whether the surrounding analysis step must be aborted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecvReport {
    /// Transport identifier of the frame, when it came through a channel.
    pub frame: Option<FrameId>,
    /// Number of entries the manifest announced.
    pub entries: usize,
    /// Entries that failed to reconstruct.
    pub failures: Vec<EntryFailure>,
}

impl RecvReport {
    /// Create a report for a frame announcing `entries` entries.
    pub fn new(entries: usize) -> Self {
        Self {
            frame: None,
            entries,
            failures: Vec::new(),
        }
    }

    /// Record a failed entry and log it.
    pub fn fail(
        &mut self,
        index: Option<usize>,
        label: impl Into<String>,
        reason: impl fmt::Display,
    ) {
        let failure = EntryFailure {
            index,
            label: label.into(),
            reason: reason.to_string(),
        };
        error!(%failure, "reconstruction failed");
        self.failures.push(failure);
    }

    /// Fold the failures of a nested frame into entry `index` of this one.
    pub fn absorb_nested(&mut self, index: usize, label: &str, nested: RecvReport) {
        for failure in nested.failures {
            self.failures.push(EntryFailure {
                index: Some(index),
                label: label.to_string(),
                reason: failure.to_string(),
            });
        }
    }

    /// Number of failures, entries and trailer combined.
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of announced entries that were reconstructed without a failure.
    pub fn restored_count(&self) -> usize {
        let mut failed: Vec<usize> = self.failures.iter().filter_map(|f| f.index).collect();
        failed.sort_unstable();
        failed.dedup();
        self.entries.saturating_sub(failed.len())
    }

    /// True when nothing failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
