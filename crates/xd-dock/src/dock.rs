//! The `Dock` state machine: `Idle → InProgress → Idle`.

use xd_core::{DockKind, Task, Timestamp};
use xd_dispatch::{PriorityModel, Queues};
use xd_ledger::{estimate, Ledger, UnitTimeTable};

use crate::{DockError, DockOperation, DockResult, DockStatus, HistoryRecord, LoadPlan};

/// Result of a start attempt on an idle dock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Dock busy or queue empty.  Nothing changed.
    Nothing,
    /// An operation began.  `remainder` is the shortfall task appended to
    /// the load queue when only part of a load could be served.
    Started {
        op:        DockOperation,
        remainder: Option<Task>,
    },
    /// The chosen load task has no stock; it is back at the queue front.
    Blocked { task: Task },
}

/// A single-slot dock for one operation kind.
///
/// Each dock owns its unit-time table; the scheduler owns the docks.
#[derive(Debug, Clone)]
pub struct Dock {
    kind:    DockKind,
    rates:   UnitTimeTable,
    current: Option<DockOperation>,
    waiting: bool,
}

impl Dock {
    /// Create an idle dock.
    pub fn new(kind: DockKind, rates: UnitTimeTable) -> Self {
        Self { kind, rates, current: None, waiting: false }
    }

    #[inline]
    pub fn kind(&self) -> DockKind {
        self.kind
    }

    #[inline]
    pub fn rates(&self) -> &UnitTimeTable {
        &self.rates
    }

    #[inline]
    pub fn current(&self) -> Option<&DockOperation> {
        self.current.as_ref()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn status(&self) -> DockStatus {
        match (&self.current, self.waiting) {
            (Some(_), _)   => DockStatus::Busy,
            (None, true)   => DockStatus::WaitingForStock,
            (None, false)  => DockStatus::Idle,
        }
    }

    /// Put `task` on the dock at `now` with a duration estimated from the
    /// dock's unit-time table.
    ///
    /// # Errors
    /// [`DockError::Busy`] if an operation is already in progress.
    pub fn begin(&mut self, task: Task, now: Timestamp) -> DockResult<&DockOperation> {
        if self.current.is_some() {
            return Err(DockError::Busy(self.kind));
        }
        let duration = estimate(task.item(), task.quantity(), &self.rates);
        self.waiting = false;
        Ok(self.current.insert(DockOperation::new(task, now, duration)))
    }

    /// Start transition: dispatch from the dock's queue if idle.
    ///
    /// Load docks check stock first (see [`LoadPlan`]): no stock blocks the
    /// dispatch, short stock serves what is there and requeues the rest.
    pub fn try_start<M: PriorityModel + ?Sized>(
        &mut self,
        now:    Timestamp,
        queues: &mut Queues,
        ledger: &Ledger,
        model:  &M,
    ) -> DockResult<StartOutcome> {
        if self.current.is_some() {
            return Ok(StartOutcome::Nothing);
        }
        let Some(task) = queues.dispatch(self.kind, now, ledger, model) else {
            self.waiting = false;
            return Ok(StartOutcome::Nothing);
        };

        let (task, remainder) = match self.kind {
            DockKind::Unload => (task, None),
            DockKind::Load => match LoadPlan::for_task(task, ledger) {
                LoadPlan::Blocked(task) => {
                    tracing::debug!(plate = %task.plate(), item = %task.item(), "load blocked: no stock");
                    queues.get_mut(DockKind::Load).push_front(task.clone());
                    self.waiting = true;
                    return Ok(StartOutcome::Blocked { task });
                }
                LoadPlan::Full(task) => (task, None),
                LoadPlan::Partial { serve, remainder } => {
                    tracing::info!(
                        plate = %serve.plate(),
                        item = %serve.item(),
                        serve = serve.quantity(),
                        shortfall = remainder.quantity(),
                        "partial load",
                    );
                    queues.requeue_partial(DockKind::Load, remainder.clone());
                    (serve, Some(remainder))
                }
            },
        };

        let op = self.begin(task, now)?.clone();
        tracing::info!(
            kind = %self.kind,
            plate = %op.task.plate(),
            item = %op.task.item(),
            qty = op.task.quantity(),
            start = %op.start,
            end = %op.end,
            "dock started",
        );
        Ok(StartOutcome::Started { op, remainder })
    }

    /// Completion transition: if the operation is due at `now`, apply it to
    /// the ledger, free the dock, and return its history record.
    ///
    /// Unloads credit the full quantity stamped at `now`; loads debit the
    /// dispatched quantity.
    ///
    /// # Errors
    /// [`DockError::InvariantViolation`] if a load debit finds less stock than
    /// was reserved at dispatch.  The dock and ledger are left unchanged.
    pub fn complete_due(
        &mut self,
        now:    Timestamp,
        ledger: &mut Ledger,
    ) -> DockResult<Option<HistoryRecord>> {
        let Some(op) = self.current.as_ref().filter(|op| op.is_due(now)) else {
            return Ok(None);
        };

        let task = &op.task;
        match self.kind {
            DockKind::Unload => ledger.credit(task.item(), task.quantity(), now),
            DockKind::Load => {
                if let Err(source) = ledger.debit(task.item(), task.quantity(), now) {
                    tracing::error!(kind = %self.kind, error = %source, "stock invariant violated");
                    return Err(DockError::InvariantViolation { kind: self.kind, source });
                }
            }
        }

        let record = HistoryRecord::completed(self.kind, op);
        tracing::info!(kind = %self.kind, plate = %task.plate(), qty = task.quantity(), "dock completed");
        self.current = None;
        Ok(Some(record))
    }
}
