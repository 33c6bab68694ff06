//! The in-flight operation on a dock.

use std::time::Duration;

use xd_core::{Task, Timestamp};

/// A task being served by a dock.
///
/// `end` is fixed at dispatch from the estimated duration and is never
/// re-estimated; the operation always runs until `now >= end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockOperation {
    /// The task being served.  For a partial load this is the reduced copy.
    pub task:  Task,
    pub start: Timestamp,
    pub end:   Timestamp,
}

impl DockOperation {
    pub fn new(task: Task, start: Timestamp, duration: Duration) -> Self {
        Self { task, start, end: start + duration }
    }

    /// `true` once the completion condition `now >= end` holds.
    #[inline]
    pub fn is_due(&self, now: Timestamp) -> bool {
        now >= self.end
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Fraction of the operation completed at `now`, in `[0.0, 1.0]`.
    ///
    /// Returns `1.0` for zero-length operations or when `now >= end`.
    pub fn progress(&self, now: Timestamp) -> f32 {
        if self.end <= self.start {
            return 1.0;
        }
        let elapsed = now.since(self.start) as f32;
        let total   = self.end.since(self.start) as f32;
        (elapsed / total).min(1.0)
    }
}

/// What a presentation layer shows for a dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockStatus {
    Idle,
    Busy,
    /// The last dispatch attempt found no stock for the front load task.
    WaitingForStock,
}
