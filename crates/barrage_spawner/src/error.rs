//! Spawner error types.

use barrage_core::PoolError;
use thiserror::Error;

/// Errors that end a spawner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpawnerError {
    /// A pool request failed with a configuration error.
    #[error("spawner {name:?} aborted at entry {index}: {source}")]
    Aborted {
        /// Spawner name.
        name: String,
        /// Entry that could not be served.
        index: usize,
        /// The pool error.
        #[source]
        source: PoolError,
    },

    /// The spawner task panicked or was cancelled by the runtime.
    #[error("spawner task failed: {0}")]
    Join(String),
}

impl SpawnerError {
    /// The pool error behind an abort, if any.
    #[must_use]
    pub const fn pool_error(&self) -> Option<&PoolError> {
        match self {
            Self::Aborted { source, .. } => Some(source),
            Self::Join(_) => None,
        }
    }
}

/// Result type for spawner operations.
pub type SpawnerResult<T> = Result<T, SpawnerError>;
