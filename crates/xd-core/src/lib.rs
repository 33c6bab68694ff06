//! `xd-core` — foundational types for the cross-dock scheduling engine.
//!
//! This crate is a dependency of every other `xd-*` crate.  It has no `xd-*`
//! dependencies and minimal external ones (`chrono` for the wall clock and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `Plate`, `ItemId`                                        |
//! | [`time`]   | `Timestamp`, `Clock`, `ManualClock`, `WallClock`         |
//! | [`task`]   | `Task`, `DockKind`                                       |
//! | [`config`] | `FacilityConfig`, `PriorityWeights`, `PriorityPolicy`    |
//! | [`error`]  | `XdError`, `XdResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod task;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DemoArrivals, FacilityConfig, PriorityPolicy, PriorityWeights};
pub use error::{XdError, XdResult};
pub use ids::{ItemId, Plate};
pub use task::{DockKind, Task};
pub use time::{Clock, ManualClock, Timestamp, WallClock};
