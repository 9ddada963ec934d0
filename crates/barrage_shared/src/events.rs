//! Pool diagnostic events.
//!
//! These are advisory. A pool emits them while it keeps serving requests;
//! nothing in here represents a failure.

use crate::kind::BulletKind;

/// Event type discriminator
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    /// Kind pre-warmed
    Prewarmed = 0,
    /// Kind exhausted, pool grew
    Exhausted = 1,
}

/// Diagnostics emitted by a pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolEvent {
    /// Pre-warm created the inactive entries for one kind.
    Prewarmed {
        /// Kind that was pre-warmed
        kind: BulletKind,
        /// Entries created
        count: usize,
    },

    /// No inactive entry of `kind` existed, so a new one was created.
    Exhausted {
        /// Kind that ran dry
        kind: BulletKind,
        /// Entries of this kind after growth
        live_count: usize,
        /// Human readable diagnostic
        message: String,
    },
}

impl PoolEvent {
    /// Builds the exhaustion event with its standard diagnostic text.
    #[must_use]
    pub fn exhausted(kind: BulletKind, live_count: usize) -> Self {
        Self::Exhausted {
            kind,
            live_count,
            message: format!(
                "no inactive {kind} entry left, created a new one; \
                 the pre-warm count for {kind} may be too small (now {live_count})"
            ),
        }
    }

    /// Returns the event type
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Prewarmed { .. } => EventType::Prewarmed,
            Self::Exhausted { .. } => EventType::Exhausted,
        }
    }

    /// Kind the event is about
    #[must_use]
    pub const fn kind(&self) -> BulletKind {
        match self {
            Self::Prewarmed { kind, .. } | Self::Exhausted { kind, .. } => *kind,
        }
    }
}
