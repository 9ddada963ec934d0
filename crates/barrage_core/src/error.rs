//! # Pool Error Types
//!
//! Configuration errors are fatal and surface at load time. Index errors
//! are recoverable by the caller. Exhaustion is not an error at all.

use barrage_shared::BulletKind;
use thiserror::Error;

/// Malformed or inconsistent configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No template was registered for the kind.
    #[error("no template registered for {0}")]
    MissingTemplate(BulletKind),

    /// The template has no prototype reference.
    #[error("template for {0} has no prototype")]
    MissingPrototype(BulletKind),

    /// A second template was registered for the same kind.
    #[error("duplicate template for {0}")]
    DuplicateTemplate(BulletKind),

    /// A spawn entry has a zero, negative or NaN cooldown.
    #[error("spawn entry {index} has non-positive cooldown {cooldown_secs}s")]
    NonPositiveCooldown {
        /// Position of the entry in its sequence.
        index: usize,
        /// The rejected cooldown in seconds.
        cooldown_secs: f64,
    },

    /// A spawn entry has a cooldown too long to represent.
    #[error("spawn entry {index} has out-of-range cooldown {cooldown_secs}s")]
    CooldownOutOfRange {
        /// Position of the entry in its sequence.
        index: usize,
        /// The rejected cooldown in seconds.
        cooldown_secs: f64,
    },

    /// A looping spawner was configured without entries.
    #[error("looping spawner {0:?} has no entries")]
    EmptySequence(String),

    /// Acquire was called before the pool was pre-warmed.
    #[error("pool used before prewarm")]
    NotPrewarmed,

    /// Pre-warm was called a second time.
    #[error("pool already prewarmed")]
    AlreadyPrewarmed,

    /// A spawn entry names a location that does not exist.
    #[error("unknown spawn location {0:?}")]
    UnknownLocation(String),

    /// A spawn entry target is missing or ambiguous.
    #[error("invalid spawn target: {0}")]
    InvalidTarget(String),

    /// The stage file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The stage file could not be read.
    #[error("io error: {0}")]
    Io(String),
}

/// Errors returned by pool operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    /// Fatal configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Spawn location index outside the location list.
    #[error("spawn location {index} out of range (have {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the location list.
        len: usize,
    },
}

impl PoolError {
    /// True for errors that must abort startup or a spawn sequence.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
