//! # Stage Error Types

use barrage_core::{ConfigError, PoolError};
use barrage_spawner::SpawnerError;
use thiserror::Error;

/// Errors that stop a stage from loading or running.
#[derive(Error, Debug)]
pub enum StageError {
    /// The stage file is malformed.
    #[error("invalid stage: {0}")]
    Config(#[from] ConfigError),

    /// The pool rejected an operation.
    #[error("pool error: {0}")]
    Pool(#[from] PoolError),

    /// A spawner aborted.
    #[error(transparent)]
    Spawner(#[from] SpawnerError),

    /// The tick length passed to [`Stage::run`](crate::Stage::run) is zero.
    #[error("tick length must be non-zero")]
    InvalidTick,

    /// The async runtime could not be built.
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Result type for stage operations.
pub type StageResult<T> = Result<T, StageError>;
