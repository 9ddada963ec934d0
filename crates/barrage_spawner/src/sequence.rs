//! # Spawn Sequences
//!
//! A spawner's configuration: an ordered list of entries and whether to
//! start over after the last one. Sequences are validated when built and
//! immutable afterwards.

use std::time::Duration;

use barrage_core::{ConfigError, ConfigResult};
use barrage_shared::{BulletKind, Vec2};

/// Where a spawn entry places its bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnTarget {
    /// An absolute position.
    Position(Vec2),
    /// An index into the pool's spawn location list.
    Location(usize),
}

/// One step of a spawn sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnEntry {
    /// Kind to request.
    pub kind: BulletKind,
    /// Wait after the request, before the next entry.
    pub cooldown: Duration,
    /// Placement.
    pub target: SpawnTarget,
}

impl SpawnEntry {
    /// Creates an entry. Validated by [`SpawnerConfig::new`].
    #[must_use]
    pub const fn new(kind: BulletKind, cooldown: Duration, target: SpawnTarget) -> Self {
        Self {
            kind,
            cooldown,
            target,
        }
    }

    /// Entry at an absolute position.
    #[must_use]
    pub const fn at(kind: BulletKind, cooldown: Duration, position: Vec2) -> Self {
        Self::new(kind, cooldown, SpawnTarget::Position(position))
    }

    /// Entry at a spawn location index.
    #[must_use]
    pub const fn at_location(kind: BulletKind, cooldown: Duration, location: usize) -> Self {
        Self::new(kind, cooldown, SpawnTarget::Location(location))
    }
}

/// Converts a cooldown in seconds from a stage file.
///
/// # Errors
///
/// - [`ConfigError::NonPositiveCooldown`] for zero, negative or NaN values
/// - [`ConfigError::CooldownOutOfRange`] for values too large for a
///   [`Duration`], infinity included
pub fn cooldown_from_secs(index: usize, secs: f64) -> ConfigResult<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(cooldown) if !cooldown.is_zero() => Ok(cooldown),
        Err(_) if secs > 0.0 => Err(ConfigError::CooldownOutOfRange {
            index,
            cooldown_secs: secs,
        }),
        _ => Err(ConfigError::NonPositiveCooldown {
            index,
            cooldown_secs: secs,
        }),
    }
}

/// A named, validated spawn sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnerConfig {
    name: String,
    entries: Vec<SpawnEntry>,
    looping: bool,
}

impl SpawnerConfig {
    /// Builds and validates a sequence.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NonPositiveCooldown`] for an entry with a zero cooldown
    /// - [`ConfigError::EmptySequence`] for a looping sequence without entries
    pub fn new(name: impl Into<String>, entries: Vec<SpawnEntry>, looping: bool) -> ConfigResult<Self> {
        let name = name.into();
        if let Some(index) = entries.iter().position(|e| e.cooldown.is_zero()) {
            return Err(ConfigError::NonPositiveCooldown {
                index,
                cooldown_secs: 0.0,
            });
        }
        if looping && entries.is_empty() {
            return Err(ConfigError::EmptySequence(name));
        }
        Ok(Self {
            name,
            entries,
            looping,
        })
    }

    /// Spawner name, used in logs and reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in spawn order.
    #[must_use]
    pub fn entries(&self) -> &[SpawnEntry] {
        &self.entries
    }

    /// Whether the sequence restarts after its last entry.
    #[must_use]
    pub const fn looping(&self) -> bool {
        self.looping
    }

    /// Sum of all cooldowns: the length of one pass.
    #[must_use]
    pub fn cycle_duration(&self) -> Duration {
        self.entries.iter().map(|e| e.cooldown).sum()
    }
}
