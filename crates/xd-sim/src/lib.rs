//! `xd-sim` — tick-driven scheduler for the cross-dock engine.
//!
//! # Tick
//!
//! ```text
//! every tick (default 1 s), at now = clock.now():
//!   for dock in [unload, load]:
//!     ① Complete: operation due (now >= end)?
//!                    unload → ledger.credit(item, qty, now)
//!                    load   → ledger.debit(item, qty)
//!                  emit HistoryRecord, dock → Idle
//!     ② Start:    dock idle and queue non-empty?
//!                    rank queue by PriorityModel, pop front
//!                    load: no stock      → task back to front, stay Idle
//!                          short stock   → serve on-hand, requeue rest
//!                    end = now + Σ(qty × unit time)
//!   observer.on_tick_end(now, facility, changed)
//! ```
//!
//! Arrivals are accepted between ticks via [`Scheduler::arrive`], so all
//! queue, dock, and ledger mutation happens on the thread that owns the
//! scheduler.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use xd_core::{Clock, FacilityConfig, WallClock};
//! use xd_sim::{NoopObserver, SchedulerBuilder};
//!
//! let clock = WallClock::new();
//! let mut scheduler = SchedulerBuilder::new(FacilityConfig::default()).build()?;
//! loop {
//!     scheduler.tick(clock.now(), &mut NoopObserver)?;
//!     std::thread::sleep(scheduler.config.tick_interval());
//! }
//! ```

pub mod builder;
pub mod error;
pub mod facility;
pub mod observer;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use builder::SchedulerBuilder;
pub use error::{SimError, SimResult};
pub use facility::Facility;
pub use observer::{NoopObserver, SchedulerObserver};
pub use scheduler::{Scheduler, TickReport};
