//! # Bullet Kinds
//!
//! The closed set of bullet patterns a stage can pool. Every lookup in the
//! pool and the template registry is keyed by [`BulletKind`].

use serde::{Deserialize, Serialize};

/// A bullet pattern category.
///
/// Stage files refer to kinds by variant name (`kind = "Hamon"`).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BulletKind {
    /// Ripple that spreads radially from the spawn point.
    Hamon = 0,
    /// Stream flowing left to right.
    SLeftERight = 1,
    /// Stream flowing right to left.
    SRightELeft = 2,
    /// Stream flowing top to bottom.
    SUpEDown = 3,
    /// Stream flowing bottom to top.
    SDownEUp = 4,
    /// Diagonal from bottom-left to top-right.
    BottomLeft = 5,
    /// Diagonal from bottom-right to top-left.
    BottomRight = 6,
    /// Diagonal from top-left to bottom-right.
    TopLeft = 7,
    /// Diagonal from top-right to bottom-left.
    TopRight = 8,
}

impl BulletKind {
    /// Number of kinds.
    pub const COUNT: usize = 9;

    /// Every kind, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Hamon,
        Self::SLeftERight,
        Self::SRightELeft,
        Self::SUpEDown,
        Self::SDownEUp,
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopLeft,
        Self::TopRight,
    ];

    /// Dense index for per-kind lookup tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Variant name as written in stage files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hamon => "Hamon",
            Self::SLeftERight => "SLeftERight",
            Self::SRightELeft => "SRightELeft",
            Self::SUpEDown => "SUpEDown",
            Self::SDownEUp => "SDownEUp",
            Self::BottomLeft => "BottomLeft",
            Self::BottomRight => "BottomRight",
            Self::TopLeft => "TopLeft",
            Self::TopRight => "TopRight",
        }
    }
}

impl std::fmt::Display for BulletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
