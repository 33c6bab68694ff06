//! Error types for xd-store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing the data files.
///
/// A missing file is not an error: it reads as empty.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field of the right line width could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        path:    PathBuf,
        line:    u64,
        message: String,
    },
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
