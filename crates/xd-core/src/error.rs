//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `XdError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The top-level error type for `xd-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum XdError {
    /// Rejected at intake; the queue is left unchanged.
    #[error("invalid task: {0}")]
    InvalidTask(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `xd-*` crates.
pub type XdResult<T> = Result<T, XdError>;
