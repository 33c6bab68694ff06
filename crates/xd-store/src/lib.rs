//! `xd-store` — durable state for the cross-dock engine.
//!
//! Plain semicolon-separated text files in one directory:
//!
//! | File                     | Contents                          | Written        |
//! |--------------------------|-----------------------------------|----------------|
//! | `unload_queue.txt`       | unload queue, front first         | every save     |
//! | `load_queue.txt`         | load queue, front first           | every save     |
//! | `warehouse.txt`          | ledger entries                    | every save     |
//! | `unload_times.txt`       | unload unit-time table            | every save     |
//! | `load_times.txt`         | load unit-time table              | every save     |
//! | `history_of_actions.txt` | completed operations              | appended       |
//!
//! [`PersistObserver`] implements `xd_sim::SchedulerObserver` and keeps the
//! files current while the scheduler runs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use xd_store::{FileStore, PersistObserver};
//!
//! let store = FileStore::new("./data");
//! let snapshot = store.load()?;
//! let mut obs = PersistObserver::new(store)?;
//! scheduler.tick(now, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("persistence error: {e}"));
//! ```

pub mod error;
pub mod history;
pub mod observer;
pub mod records;
pub mod snapshot;


pub use error::{StoreError, StoreResult};
pub use history::{read_history, HistoryWriter};
pub use observer::PersistObserver;
pub use records::{read_rates, read_tasks, read_warehouse, write_rates, write_tasks, write_warehouse};
pub use snapshot::{FileStore, Snapshot};
