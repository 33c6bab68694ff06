//! `xd-dispatch` — pending-vehicle queues and priority-based dispatch.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`queue`]    | `TaskQueue`, `Queues` (dispatch, partial requeue)            |
//! | [`priority`] | `score`, `PriorityModel`, `WeightedPriority`, `KeyOrderPriority`, `Ranking` |
//!
//! # Dispatch model (summary)
//!
//! ```text
//! keys  = model.key(task, kind, ctx) for each queued task
//! queue = stable sort by keys, descending
//! task  = queue.pop_front()
//! ```
//!
//! Nothing here fails: an empty queue dispatches `None`.

pub mod priority;
pub mod queue;


pub use priority::{
    availability_score, dependency_score, score, KeyOrderPriority, PriorityContext, PriorityKey,
    PriorityModel, Ranking, WeightedPriority,
};
pub use queue::{Queues, TaskQueue};
