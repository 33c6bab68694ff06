//! `TaskQueue` and `Queues`: pending vehicles and priority dispatch.
//!
//! # Ordering model
//!
//! A queue keeps plain insertion order while tasks wait.  Only at the moment
//! a dock asks for work is the whole queue re-ranked by priority:
//!
//! ```text
//! keys     = [model.key(task) for task in queue]   (scored on a snapshot)
//! queue    = stable_sort_desc(queue, keys)         (ties keep arrival order)
//! dispatch = queue.pop_front()
//! ```
//!
//! The re-ranked order is what remains in the queue afterwards.  Scoring is
//! O(n) per dispatch and the sort O(n log n); dispatch only happens when a
//! dock goes idle, never on every tick.

use std::collections::VecDeque;

use xd_core::{DockKind, ItemId, Task, Timestamp};
use xd_ledger::Ledger;

use crate::priority::{PriorityContext, PriorityKey, PriorityModel};

// ── TaskQueue ─────────────────────────────────────────────────────────────────

/// An ordered sequence of pending tasks for one dock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskQueue {
    inner: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new arrival (or a partial-load remainder) at the back.
    pub fn push_back(&mut self, task: Task) {
        self.inner.push_back(task);
    }

    /// Put a task back at the very front without re-ranking.
    pub fn push_front(&mut self, task: Task) {
        self.inner.push_front(task);
    }

    pub fn pop_front(&mut self) -> Option<Task> {
        self.inner.pop_front()
    }

    pub fn front(&self) -> Option<&Task> {
        self.inner.front()
    }

    /// Reorder by descending key.  Equal keys keep their current relative
    /// order.  `keys[i]` belongs to the task currently at position `i`.
    ///
    /// # Panics
    /// Panics in debug mode if `keys.len() != self.len()`.
    pub fn rank(&mut self, keys: &[PriorityKey]) {
        debug_assert_eq!(keys.len(), self.inner.len());
        let mut order: Vec<usize> = (0..self.inner.len()).collect();
        // `sort_by` is stable.
        order.sort_by(|&a, &b| keys[b].cmp(&keys[a]));

        let mut slots: Vec<Option<Task>> = self.inner.drain(..).map(Some).collect();
        self.inner = order.into_iter().filter_map(|i| slots[i].take()).collect();
    }

    /// Position of the first task for `item`, if any.
    pub fn position_of_item(&self, item: &ItemId) -> Option<usize> {
        self.inner.iter().position(|t| t.item() == item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Task> for TaskQueue {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self { inner: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a TaskQueue {
    type Item = &'a Task;
    type IntoIter = std::collections::vec_deque::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

// ── Queues ────────────────────────────────────────────────────────────────────

/// The unload-pending and load-pending queues together.
///
/// They live side by side because scoring an unload task reads the load
/// queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Queues {
    pub unload: TaskQueue,
    pub load:   TaskQueue,
}

impl Queues {
    pub fn new(unload: TaskQueue, load: TaskQueue) -> Self {
        Self { unload, load }
    }

    #[inline]
    pub fn get(&self, kind: DockKind) -> &TaskQueue {
        match kind {
            DockKind::Unload => &self.unload,
            DockKind::Load   => &self.load,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, kind: DockKind) -> &mut TaskQueue {
        match kind {
            DockKind::Unload => &mut self.unload,
            DockKind::Load   => &mut self.load,
        }
    }

    /// Append a new arrival to the queue for `kind`.
    pub fn enqueue(&mut self, kind: DockKind, task: Task) {
        tracing::info!(%kind, plate = %task.plate(), item = %task.item(), qty = task.quantity(), "vehicle queued");
        self.get_mut(kind).push_back(task);
    }

    /// Return the remainder of a partially served task to the back of the
    /// queue, where it competes again on the next dispatch.
    pub fn requeue_partial(&mut self, kind: DockKind, task: Task) {
        self.get_mut(kind).push_back(task);
    }

    /// Re-rank the queue for `kind` and remove its highest-priority task.
    ///
    /// Returns `None` and leaves everything untouched if the queue is empty.
    pub fn dispatch<M: PriorityModel + ?Sized>(
        &mut self,
        kind:   DockKind,
        now:    Timestamp,
        ledger: &Ledger,
        model:  &M,
    ) -> Option<Task> {
        if self.get(kind).is_empty() {
            return None;
        }
        let keys = self.score_all(kind, now, ledger, model);
        let queue = self.get_mut(kind);
        queue.rank(&keys);
        queue.pop_front()
    }

    /// Priority keys for every task in the `kind` queue, in queue order.
    pub fn score_all<M: PriorityModel + ?Sized>(
        &self,
        kind:   DockKind,
        now:    Timestamp,
        ledger: &Ledger,
        model:  &M,
    ) -> Vec<PriorityKey> {
        let ctx = PriorityContext { now, load_queue: &self.load, ledger };
        self.get(kind).iter().map(|task| model.key(task, kind, &ctx)).collect()
    }
}
