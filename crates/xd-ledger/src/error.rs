use thiserror::Error;

use xd_core::ItemId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A debit asked for more than the ledger holds for `item`.
    #[error("insufficient stock of {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item:      ItemId,
        requested: u32,
        available: u32,
    },
}

pub type LedgerResult<T> = Result<T, LedgerError>;
