//! Scheduler observer trait for history emission, persistence, and progress.

use xd_core::{DockKind, Task, Timestamp};
use xd_dock::{DockOperation, HistoryRecord};

use crate::Facility;

/// Callbacks invoked by [`Scheduler::tick`][crate::Scheduler::tick] at key
/// points.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: completion printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SchedulerObserver for Printer {
///     fn on_complete(&mut self, record: &HistoryRecord) {
///         println!("{} {} done at {}", record.action, record.task, record.end);
///     }
/// }
/// ```
pub trait SchedulerObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _now: Timestamp) {}

    /// Called when a dock starts an operation.  `remainder` is the shortfall
    /// requeued by a partial load.
    fn on_dispatch(&mut self, _kind: DockKind, _op: &DockOperation, _remainder: Option<&Task>) {}

    /// Called when the load dock could not start because `task` has no stock.
    fn on_blocked(&mut self, _kind: DockKind, _task: &Task) {}

    /// Called once per completed operation, after the ledger was updated.
    fn on_complete(&mut self, _record: &HistoryRecord) {}

    /// Called at the end of each tick with read access to the whole state.
    ///
    /// `changed` is `true` if any queue, dock, or ledger entry changed this
    /// tick.
    fn on_tick_end(&mut self, _now: Timestamp, _facility: &Facility, _changed: bool) {}
}

/// A [`SchedulerObserver`] that does nothing.
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}
