//! Priority scoring for pending tasks.
//!
//! The queue manager asks a [`PriorityModel`] for one [`PriorityKey`] per
//! task and dispatches the largest.  Two models are provided:
//!
//! - [`WeightedPriority`] (default): the weighted sum from [`score`]:
//!
//!   ```text
//!   priority = waiting_secs × w_wait + dependency × w_dep + availability × w_avail
//!   ```
//!
//! - [`KeyOrderPriority`]: a two-key ordering: unloads by (dependency,
//!   quantity), loads by (on hand?, smallest stock first).  Waiting time is
//!   ignored.
//!
//! Both are pure functions of their inputs, so identical queue and ledger
//! snapshots at the same `now` always produce the same dispatch.

use std::cmp::Ordering;

use xd_core::{DockKind, ItemId, PriorityPolicy, PriorityWeights, Task, Timestamp};
use xd_ledger::Ledger;

use crate::TaskQueue;

// ── Context ───────────────────────────────────────────────────────────────────

/// Read-only view of the facility used while scoring.
#[derive(Clone, Copy)]
pub struct PriorityContext<'a> {
    pub now:        Timestamp,
    pub load_queue: &'a TaskQueue,
    pub ledger:     &'a Ledger,
}

// ── Key ───────────────────────────────────────────────────────────────────────

/// A sortable priority: compared on the first component, then the second.
/// Larger is more urgent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PriorityKey(pub f64, pub f64);

impl PriorityKey {
    #[inline]
    pub fn scalar(v: f64) -> Self {
        PriorityKey(v, 0.0)
    }
}

impl Eq for PriorityKey {}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0).then(self.1.total_cmp(&other.1))
    }
}

// ── Factor helpers ────────────────────────────────────────────────────────────

/// How urgently the load queue needs `item`: `len − index` of its first
/// occurrence, so earlier positions score higher.  0 if not needed.
pub fn dependency_score(item: &ItemId, load_queue: &TaskQueue) -> u64 {
    load_queue
        .position_of_item(item)
        .map_or(0, |idx| (load_queue.len() - idx) as u64)
}

/// 1 if `item` is on hand, else 0.
pub fn availability_score(item: &ItemId, ledger: &Ledger) -> u64 {
    u64::from(ledger.available(item) > 0)
}

/// Weighted-sum priority of `task` waiting in the `kind` queue.
///
/// Unload tasks score waiting time plus dependency; load tasks score waiting
/// time plus availability.
pub fn score(
    task:       &Task,
    kind:       DockKind,
    now:        Timestamp,
    load_queue: &TaskQueue,
    ledger:     &Ledger,
    weights:    &PriorityWeights,
) -> f64 {
    let waiting = now.since(task.arrival()) as f64;
    let (dependency, availability) = match kind {
        DockKind::Unload => (dependency_score(task.item(), load_queue), 0),
        DockKind::Load   => (0, availability_score(task.item(), ledger)),
    };
    waiting * weights.wait
        + dependency as f64 * weights.dependency
        + availability as f64 * weights.availability
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Ranking rule used by the queue manager at dispatch.
///
/// # Contract
///
/// - Must be deterministic: no clock reads, no randomness.
/// - Must not mutate anything or perform I/O.
pub trait PriorityModel: Send + Sync {
    fn key(&self, task: &Task, kind: DockKind, ctx: &PriorityContext<'_>) -> PriorityKey;
}

/// The weighted-sum model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightedPriority {
    pub weights: PriorityWeights,
}

impl WeightedPriority {
    pub fn new(weights: PriorityWeights) -> Self {
        Self { weights }
    }
}

impl PriorityModel for WeightedPriority {
    #[inline]
    fn key(&self, task: &Task, kind: DockKind, ctx: &PriorityContext<'_>) -> PriorityKey {
        PriorityKey::scalar(score(task, kind, ctx.now, ctx.load_queue, ctx.ledger, &self.weights))
    }
}

/// The two-key model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyOrderPriority;

impl PriorityModel for KeyOrderPriority {
    fn key(&self, task: &Task, kind: DockKind, ctx: &PriorityContext<'_>) -> PriorityKey {
        match kind {
            DockKind::Unload => PriorityKey(
                dependency_score(task.item(), ctx.load_queue) as f64,
                task.quantity() as f64,
            ),
            DockKind::Load => PriorityKey(
                availability_score(task.item(), ctx.ledger) as f64,
                -(ctx.ledger.available(task.item()) as f64),
            ),
        }
    }
}

/// Runtime choice between the two models, built from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ranking {
    Weighted(WeightedPriority),
    KeyOrder(KeyOrderPriority),
}

impl Ranking {
    pub fn from_config(policy: PriorityPolicy, weights: PriorityWeights) -> Self {
        match policy {
            PriorityPolicy::Weighted => Ranking::Weighted(WeightedPriority::new(weights)),
            PriorityPolicy::KeyOrder => Ranking::KeyOrder(KeyOrderPriority),
        }
    }
}

impl Default for Ranking {
    fn default() -> Self {
        Ranking::Weighted(WeightedPriority::default())
    }
}

impl PriorityModel for Ranking {
    #[inline]
    fn key(&self, task: &Task, kind: DockKind, ctx: &PriorityContext<'_>) -> PriorityKey {
        match self {
            Ranking::Weighted(m) => m.key(task, kind, ctx),
            Ranking::KeyOrder(m) => m.key(task, kind, ctx),
        }
    }
}
