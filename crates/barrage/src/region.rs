//! # Play Region
//!
//! Bullets are released when they leave the play area. The pool does not
//! know about geometry; the [`RegionWatcher`] compares active entries
//! against a [`Region`] and posts exits on the pool's exit channel.

use barrage_core::{ExitSender, Pool, PrototypeSource};
use barrage_shared::Vec2;

/// Axis-aligned rectangle. Points on the edge are inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    min: Vec2,
    max: Vec2,
}

impl Region {
    /// Creates a region from two corners in any order.
    #[must_use]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Lower corner.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Upper corner.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// True if `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Posts an exit for every active entry outside its region.
pub struct RegionWatcher {
    region: Region,
    exits: ExitSender,
}

impl RegionWatcher {
    /// Watches `region`, reporting to `exits`.
    #[must_use]
    pub fn new(region: Region, exits: ExitSender) -> Self {
        Self { region, exits }
    }

    /// The watched region.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Checks every active entry once. Returns the number of exits posted.
    ///
    /// Exits are only queued; the pool applies them on its next
    /// [`Pool::drain_exits`].
    pub fn sweep<S: PrototypeSource>(&self, pool: &Pool<S>) -> usize {
        let mut posted = 0;
        for entry in pool.snapshot() {
            if entry.active
                && !self.region.contains(entry.position)
                && self.exits.exit(entry.handle)
            {
                posted += 1;
            }
        }
        if posted > 0 {
            tracing::trace!(posted, "region exits");
        }
        posted
    }
}
