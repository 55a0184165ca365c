//! Error types used by the keyrelay runtime.
//!
//! The only fallible operation in the crate is worker-thread creation at
//! pool construction. Everything else (subscribe contention, pushes at
//! unclaimed keys, dispatch to a dead subscriber) reports through return
//! values or stays silent by contract.

use std::io;
use thiserror::Error;

/// # Errors produced while bringing up the worker pool.
///
/// Construction is all-or-nothing: if any worker thread fails to spawn,
/// the threads already started are stopped and joined, and the whole
/// pool build fails with this error. There is no degraded partial-pool
/// mode.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PoolError {
    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker thread {index}: {source}")]
    Spawn {
        /// Zero-based index of the worker that failed to start.
        index: usize,
        /// The underlying I/O error from the spawn attempt.
        source: io::Error,
    },
}

impl PoolError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use keyrelay::PoolError;
    /// use std::io;
    ///
    /// let err = PoolError::Spawn { index: 0, source: io::Error::other("boom") };
    /// assert_eq!(err.as_label(), "pool_spawn_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PoolError::Spawn { .. } => "pool_spawn_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            PoolError::Spawn { index, source } => {
                format!("worker {index} did not start: {source}")
            }
        }
    }
}
