//! Pool entries and the handles that point at them.

use barrage_shared::{BulletKind, Vec2};

/// Non-owning reference to a pool entry.
///
/// The handle records which activation of the entry it was issued for
/// (the generation). Once the entry is released and acquired again, older
/// handles stop matching and every operation on them is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle {
    index: usize,
    kind: BulletKind,
    generation: u64,
}

impl PoolHandle {
    #[inline]
    pub(crate) const fn new(index: usize, kind: BulletKind, generation: u64) -> Self {
        Self {
            index,
            kind,
            generation,
        }
    }

    /// Position of the entry in insertion order.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Kind of the entry.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> BulletKind {
        self.kind
    }

    /// Activation this handle was issued for.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// An owned instance plus its reuse state.
pub(crate) struct PoolEntry<I> {
    pub(crate) instance: I,
    pub(crate) kind: BulletKind,
    pub(crate) active: bool,
    pub(crate) position: Vec2,
    /// Times this entry has been acquired. Doubles as the handle generation.
    pub(crate) activations: u64,
}

impl<I> PoolEntry<I> {
    /// New inactive entry.
    pub(crate) fn new(instance: I, kind: BulletKind) -> Self {
        Self {
            instance,
            kind,
            active: false,
            position: Vec2::ZERO,
            activations: 0,
        }
    }

    /// Marks active at `position` and returns the handle for this activation.
    #[inline]
    pub(crate) fn activate(&mut self, index: usize, position: Vec2) -> PoolHandle {
        self.active = true;
        self.position = position;
        self.activations += 1;
        PoolHandle::new(index, self.kind, self.activations)
    }

    /// True if `handle` was issued for the current activation.
    #[inline]
    pub(crate) fn is_current(&self, handle: PoolHandle) -> bool {
        self.kind == handle.kind && self.activations == handle.generation
    }

    pub(crate) fn snapshot(&self, index: usize) -> EntrySnapshot {
        EntrySnapshot {
            handle: PoolHandle::new(index, self.kind, self.activations),
            kind: self.kind,
            active: self.active,
            position: self.position,
            activations: self.activations,
        }
    }
}

/// Copy of an entry's state at one point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntrySnapshot {
    /// Handle for the entry's latest activation.
    pub handle: PoolHandle,
    /// Kind of the entry.
    pub kind: BulletKind,
    /// Whether the entry is in use.
    pub active: bool,
    /// Last position the entry was placed at.
    pub position: Vec2,
    /// Times the entry has been acquired.
    pub activations: u64,
}
