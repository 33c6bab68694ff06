//! Dispatch-time stock check for load tasks.

use std::num::NonZeroU32;

use xd_core::Task;
use xd_ledger::Ledger;

/// How much of a dispatched load task the warehouse can serve right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPlan {
    /// Nothing on hand.  The task goes back to the front of the queue.
    Blocked(Task),
    /// Enough stock for the whole request.
    Full(Task),
    /// Serve `serve` now; `remainder` (the shortfall) goes to the back of
    /// the queue.  Both keep the original plate, arrival, and item.
    Partial { serve: Task, remainder: Task },
}

impl LoadPlan {
    pub fn for_task(task: Task, ledger: &Ledger) -> LoadPlan {
        let Some(on_hand) = NonZeroU32::new(ledger.available(task.item())) else {
            return LoadPlan::Blocked(task);
        };
        match task.split(on_hand) {
            (serve, Some(remainder)) => LoadPlan::Partial { serve, remainder },
            (task, None)             => LoadPlan::Full(task),
        }
    }
}
