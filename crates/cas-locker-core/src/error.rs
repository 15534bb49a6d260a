//! Error types for locker operations.

use thiserror::Error;

/// Errors that can occur during locker operations.
#[derive(Error, Debug)]
pub enum LockerError {
    /// Invalid lock name.
    #[error("invalid lock name: {0}")]
    InvalidName(String),

    /// Invalid store configuration, detected before any connection attempt.
    #[error("invalid locker store configuration: {0}")]
    InvalidConfig(String),

    /// Operation was cancelled before the store reported an outcome.
    ///
    /// The outcome of an in-flight write is unknown at this point; callers
    /// must not assume the lock is held.
    #[error("locker operation was cancelled")]
    Cancelled,

    /// Lock acquisition lost the race for the key.
    ///
    /// Raised by the acquisition runner, which treats contention as fatal
    /// for the current run.
    #[error("failed to acquire lock '{0}'")]
    AcquisitionFailed(String),

    /// Store-side error other than a compare-exchange conflict.
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LockerError {
    /// Wraps an arbitrary backend error as a store error.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(err))
    }
}

/// Result type for locker operations.
pub type LockerResult<T> = Result<T, LockerError>;
