//! `xd-dock` — the per-dock state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`state`]     | `DockOperation` (task, start, end), `DockStatus`              |
//! | [`dock`]      | `Dock`: start and completion transitions, `StartOutcome`     |
//! | [`load_plan`] | `LoadPlan`: dispatch-time stock check for loads              |
//! | [`history`]   | `HistoryRecord`: one per completed operation                 |
//! | [`error`]     | `DockError`, `DockResult<T>`                                  |
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──try_start──▶ InProgress ──complete_due(now ≥ end)──▶ Idle
//!   ▲                                                     │
//!   └──── Blocked (load, no stock: task back at front) ◀──┘ (next tick)
//! ```
//!
//! 1. `Dock::try_start` dispatches through [`xd_dispatch::Queues`] and fixes
//!    `end = now + estimate(item, qty)`.
//! 2. The dock holds the operation until `now >= end`.
//! 3. `Dock::complete_due` credits (unload) or debits (load) the ledger and
//!    returns the [`HistoryRecord`].

pub mod dock;
pub mod error;
pub mod history;
pub mod load_plan;
pub mod state;


pub use dock::{Dock, StartOutcome};
pub use error::{DockError, DockResult};
pub use history::{HistoryRecord, ACTION_LOAD, ACTION_UNLOAD};
pub use load_plan::LoadPlan;
pub use state::{DockOperation, DockStatus};
