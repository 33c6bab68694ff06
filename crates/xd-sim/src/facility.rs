//! `Facility`: the single aggregate of mutable engine state.

use xd_core::DockKind;
use xd_dispatch::{Queues, TaskQueue};
use xd_dock::Dock;
use xd_ledger::{Ledger, UnitTimeTable};

/// Both queues, the warehouse ledger, and both docks.
///
/// Owned by the [`Scheduler`][crate::Scheduler], which is the only writer.
/// Everything else (observers, persistence, a presentation layer) gets a
/// shared borrow.
#[derive(Debug, Clone)]
pub struct Facility {
    pub(crate) queues:      Queues,
    pub(crate) ledger:      Ledger,
    pub(crate) unload_dock: Dock,
    pub(crate) load_dock:   Dock,
}

impl Facility {
    pub fn new(
        queues:       Queues,
        ledger:       Ledger,
        unload_rates: UnitTimeTable,
        load_rates:   UnitTimeTable,
    ) -> Self {
        Self {
            queues,
            ledger,
            unload_dock: Dock::new(DockKind::Unload, unload_rates),
            load_dock:   Dock::new(DockKind::Load, load_rates),
        }
    }

    #[inline]
    pub fn queues(&self) -> &Queues {
        &self.queues
    }

    #[inline]
    pub fn queue(&self, kind: DockKind) -> &TaskQueue {
        self.queues.get(kind)
    }

    #[inline]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[inline]
    pub fn dock(&self, kind: DockKind) -> &Dock {
        match kind {
            DockKind::Unload => &self.unload_dock,
            DockKind::Load   => &self.load_dock,
        }
    }

    /// `true` when both docks are idle and both queues empty.
    pub fn is_quiet(&self) -> bool {
        DockKind::ALL
            .iter()
            .all(|&k| self.dock(k).is_idle() && self.queue(k).is_empty())
    }
}
