//! The `Scheduler` struct and its tick.

use xd_core::{DockKind, FacilityConfig, ManualClock, Clock, Task, Timestamp};
use xd_dispatch::{PriorityModel, Ranking};
use xd_dock::{HistoryRecord, StartOutcome};

use crate::{Facility, SchedulerObserver, SimResult};

/// What one tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub now:       Timestamp,
    /// Operations completed this tick, unload dock first.
    pub completed: Vec<HistoryRecord>,
    /// Operations started this tick.
    pub started:   usize,
    /// Load dispatches that found no stock.
    pub blocked:   usize,
}

impl TickReport {
    /// `true` if any queue, dock, or ledger entry changed.
    ///
    /// A blocked dispatch counts: it re-ranks the load queue.
    pub fn changed(&self) -> bool {
        !self.completed.is_empty() || self.started > 0 || self.blocked > 0
    }
}

/// The scheduler: owns the [`Facility`] and advances it one tick at a time.
///
/// # Tick
///
/// For each dock independently, unload dock first:
///
/// 1. **Complete**: if an operation is due (`now >= end`), apply it to the
///    ledger and emit its [`HistoryRecord`].
/// 2. **Start**: if the dock is idle and its queue is non-empty, dispatch
///    the highest-priority task.
///
/// A tick with nothing due and nothing queued changes nothing.
///
/// Create via [`SchedulerBuilder`][crate::SchedulerBuilder].
pub struct Scheduler<M: PriorityModel = Ranking> {
    /// Configuration the scheduler was built from.
    pub config: FacilityConfig,

    pub(crate) facility: Facility,

    /// Ranking rule used at every dispatch.
    pub model: M,

    /// Number of ticks executed so far.
    pub ticks: u64,
}

impl<M: PriorityModel> Scheduler<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Read-only view of queues, ledger, and docks.
    #[inline]
    pub fn facility(&self) -> &Facility {
        &self.facility
    }

    /// Accept a validated arrival into the `kind` queue.
    pub fn enqueue(&mut self, kind: DockKind, task: Task) {
        self.facility.queues.enqueue(kind, task);
    }

    /// Validate and accept a new arrival at `now`.
    ///
    /// # Errors
    /// [`SimError::Intake`][crate::SimError::Intake] wrapping
    /// `XdError::InvalidTask`; the queue is left unchanged.
    pub fn arrive(
        &mut self,
        kind:     DockKind,
        plate:    &str,
        item:     &str,
        quantity: u32,
        now:      Timestamp,
    ) -> SimResult<()> {
        let task = Task::new(plate, now, item, quantity).inspect_err(|e| {
            tracing::warn!(%kind, plate, item, quantity, error = %e, "arrival rejected");
        })?;
        self.enqueue(kind, task);
        Ok(())
    }

    /// Run one tick at `now`.
    ///
    /// # Errors
    /// Only a ledger invariant violation on load completion, which is fatal.
    pub fn tick<O: SchedulerObserver>(
        &mut self,
        now:      Timestamp,
        observer: &mut O,
    ) -> SimResult<TickReport> {
        observer.on_tick_start(now);
        let mut report = TickReport { now, ..Default::default() };

        for kind in DockKind::ALL {
            self.step_dock(kind, now, observer, &mut report)?;
        }

        self.ticks += 1;
        observer.on_tick_end(now, &self.facility, report.changed());
        Ok(report)
    }

    /// Run `n` ticks, advancing `clock` by `step_secs` after each one.
    ///
    /// Useful for tests and replays where wall-clock pacing is not wanted.
    pub fn run_ticks<O: SchedulerObserver>(
        &mut self,
        n:         u64,
        clock:     &mut ManualClock,
        step_secs: u64,
        observer:  &mut O,
    ) -> SimResult<Vec<TickReport>> {
        let mut reports = Vec::with_capacity(n as usize);
        for _ in 0..n {
            reports.push(self.tick(clock.now(), observer)?);
            clock.advance(step_secs);
        }
        Ok(reports)
    }

    // ── Per-dock step ─────────────────────────────────────────────────────

    fn step_dock<O: SchedulerObserver>(
        &mut self,
        kind:     DockKind,
        now:      Timestamp,
        observer: &mut O,
        report:   &mut TickReport,
    ) -> SimResult<()> {
        let Facility { queues, ledger, unload_dock, load_dock } = &mut self.facility;
        let dock = match kind {
            DockKind::Unload => unload_dock,
            DockKind::Load   => load_dock,
        };

        // ── Completion ────────────────────────────────────────────────────
        if let Some(record) = dock.complete_due(now, ledger)? {
            observer.on_complete(&record);
            report.completed.push(record);
        }

        // ── Start ─────────────────────────────────────────────────────────
        match dock.try_start(now, queues, ledger, &self.model)? {
            StartOutcome::Nothing => {}
            StartOutcome::Started { op, remainder } => {
                observer.on_dispatch(kind, &op, remainder.as_ref());
                report.started += 1;
            }
            StartOutcome::Blocked { task } => {
                observer.on_blocked(kind, &task);
                report.blocked += 1;
            }
        }
        Ok(())
    }
}
