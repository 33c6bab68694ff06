//! `xd-ledger` — warehouse stock and handling-rate tables.
//!
//! # Crate layout
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`ledger`]    | `Ledger`, `StockEntry`                              |
//! | [`unit_time`] | `UnitTimeTable`, `estimate`                         |
//! | [`error`]     | `LedgerError`, `LedgerResult<T>`                    |
//!
//! Only the scheduler tick writes the ledger.  Priority scoring and duration
//! estimation borrow it read-only.

pub mod error;
pub mod ledger;
pub mod unit_time;


pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, StockEntry};
pub use unit_time::{estimate, UnitTimeTable};
