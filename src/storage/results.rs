//! Storage result types
//!
//! Defines what a dispatched write actually did.

/// Outcome of writing one descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File contents were written
    Written { bytes: u64 },
    /// Directory was created or already present
    Directory,
    /// Exclusive write hit an existing file, which was left untouched
    SkippedExisting,
    /// Symlink created or already present
    Linked,
    /// Path-only record, nothing written
    Nothing,
}

impl WriteOutcome {
    /// Whether permission bits should be reconciled after this outcome
    pub fn needs_mode_sync(&self) -> bool {
        matches!(self, WriteOutcome::Written { .. } | WriteOutcome::Directory)
    }
}
