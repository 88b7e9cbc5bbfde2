//! Error types for the store and roll service.

use std::path::PathBuf;

use thiserror::Error;
use vtm_mechanics::MechError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while storing characters or performing rolls.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The dice engine or sheet rejected the operation.
    #[error(transparent)]
    Mechanics(#[from] MechError),

    /// The store file could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The store file is not valid JSON of the expected shape.
    #[error("malformed store: {0}")]
    Format(#[from] serde_json::Error),

    /// Another thread panicked while holding a lock.
    #[error("lock poisoned for character '{0}'")]
    LockPoisoned(String),

    /// A sheet edit named a field the sheet does not have.
    #[error("unknown field: {0}")]
    UnknownField(String),
}
