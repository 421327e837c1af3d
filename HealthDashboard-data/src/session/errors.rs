use std::sync::PoisonError;
use thiserror::Error;

/// Error type for session storage writes
#[derive(Error, Debug)]
pub enum SessionError {
    /// Filesystem error
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Lock error
    #[error("Session lock error: {0}")]
    Lock(String),
}

impl<T> From<PoisonError<T>> for SessionError {
    fn from(error: PoisonError<T>) -> Self {
        SessionError::Lock(error.to_string())
    }
}
