use thiserror::Error;

use xd_core::XdError;
use xd_dock::DockError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scheduler configuration error: {0}")]
    Config(String),

    /// A new arrival failed validation; the queue is unchanged.
    #[error(transparent)]
    Intake(#[from] XdError),

    /// Fatal: the scheduler must stop.
    #[error("dock error: {0}")]
    Dock(#[from] DockError),
}

pub type SimResult<T> = Result<T, SimError>;
