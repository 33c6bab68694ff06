use thiserror::Error;

use xd_core::DockKind;
use xd_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum DockError {
    #[error("{0} dock is already busy")]
    Busy(DockKind),

    /// Stock vanished between dispatch and completion.  The dispatch-time
    /// check makes this impossible unless the ledger was modified elsewhere.
    #[error("invariant violated on {kind} completion: {source}")]
    InvariantViolation {
        kind:   DockKind,
        #[source]
        source: LedgerError,
    },
}

pub type DockResult<T> = Result<T, DockError>;
