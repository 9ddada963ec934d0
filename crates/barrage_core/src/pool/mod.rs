//! # Reuse Pool
//!
//! Owns every pooled instance of a stage. Instances are created up front by
//! [`Pool::prewarm`], handed out by [`Pool::acquire`] and returned by
//! [`Pool::release`]. The pool never shrinks and never retypes an entry.
//!
//! ## Acquisition Policy
//!
//! 1. Scan entries in insertion order for the first inactive entry of the
//!    requested kind. Activate it, move it, return its handle.
//! 2. If there is none, build a new entry from the kind's template, append
//!    it already active, and report a [`PoolEvent::Exhausted`].
//!
//! Growth is degradation, not failure: a stage always gets its bullet.
//!
//! The scan is linear on purpose. Pools hold tens of entries and scanning in
//! insertion order makes reuse reproducible (earliest-created wins). A
//! per-kind free list would make acquisition O(1) without changing which
//! entry is returned.
//!
//! ## Thread Safety
//!
//! All entry state sits behind one [`parking_lot::Mutex`]. Scan-and-mark and
//! growth happen inside the same critical section, so two concurrent
//! acquisitions never receive the same entry.
//!
//! ## Example
//!
//! ```rust,ignore
//! let pool = Pool::new(registry, prototypes).with_locations(locations);
//! pool.prewarm()?;
//!
//! let bullet = pool.acquire(Vec2::new(0.0, 4.0), BulletKind::Hamon)?;
//! // ... bullet leaves the playfield ...
//! pool.release(bullet);
//! ```

mod entry;

pub use entry::{EntrySnapshot, PoolHandle};

use barrage_shared::{BulletKind, PoolEvent, Vec2};
use parking_lot::Mutex;

use crate::error::{ConfigError, PoolResult};
use crate::events::EventSender;
use crate::locations::SpawnLocations;
use crate::prototype::PrototypeSource;
use crate::registry::TemplateRegistry;
use crate::signal::ExitReceiver;
use entry::PoolEntry;

/// Entry counts at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// All entries.
    pub total: usize,
    /// Entries in use.
    pub active: usize,
    /// Entries free for reuse.
    pub inactive: usize,
    /// Entries created on demand after pre-warm.
    pub grown: usize,
}

/// Mutable pool state, guarded by the pool lock.
struct PoolState<I> {
    /// Every entry, in creation order.
    entries: Vec<PoolEntry<I>>,
    /// Entries per kind.
    counts: [usize; BulletKind::COUNT],
    /// Set once pre-warm completed.
    prewarmed: bool,
    /// Entries created by fallback growth.
    grown: usize,
}

impl<I> PoolState<I> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            counts: [0; BulletKind::COUNT],
            prewarmed: false,
            grown: 0,
        }
    }

    fn push(&mut self, entry: PoolEntry<I>) -> usize {
        self.counts[entry.kind.index()] += 1;
        self.entries.push(entry);
        self.entries.len() - 1
    }

    fn release(&mut self, handle: PoolHandle) -> bool {
        match self.entries.get_mut(handle.index()) {
            Some(entry) if entry.active && entry.is_current(handle) => {
                entry.active = false;
                true
            }
            _ => false,
        }
    }
}

/// Typed reuse pool.
///
/// Share it between spawners and exit sources with an `Arc`.
pub struct Pool<S: PrototypeSource> {
    /// Templates, read-only.
    registry: TemplateRegistry,
    /// Builds new instances.
    source: S,
    /// Positions for [`Pool::acquire_at`].
    locations: SpawnLocations,
    /// Optional diagnostic channel.
    events: Option<EventSender>,
    /// Entry list and counters.
    state: Mutex<PoolState<S::Instance>>,
}

impl<S: PrototypeSource> Pool<S> {
    /// Creates an empty pool. Call [`prewarm`](Self::prewarm) before use.
    #[must_use]
    pub fn new(registry: TemplateRegistry, source: S) -> Self {
        Self {
            registry,
            source,
            locations: SpawnLocations::new(),
            events: None,
            state: Mutex::new(PoolState::new()),
        }
    }

    /// Sets the spawn location list used by [`acquire_at`](Self::acquire_at).
    #[must_use]
    pub fn with_locations(mut self, locations: SpawnLocations) -> Self {
        self.locations = locations;
        self
    }

    /// Attaches a diagnostic event channel.
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Creates the inactive entries for every registered template.
    ///
    /// Templates are processed in registration order, so entry order (and
    /// therefore reuse order) is fixed by the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::AlreadyPrewarmed`] on a second call
    /// - [`ConfigError::MissingPrototype`] if a template has no prototype;
    ///   nothing is created in that case
    pub fn prewarm(&self) -> PoolResult<()> {
        for template in self.registry.iter() {
            template.validate()?;
        }

        let mut state = self.state.lock();
        if state.prewarmed {
            return Err(ConfigError::AlreadyPrewarmed.into());
        }

        state.entries.reserve(self.registry.total_prewarm());
        for template in self.registry.iter() {
            for _ in 0..template.max_count {
                let instance = self.source.produce(template);
                state.push(PoolEntry::new(instance, template.kind));
            }
        }
        state.prewarmed = true;
        let total = state.entries.len();
        drop(state);

        for template in self.registry.iter() {
            tracing::debug!(kind = %template.kind, count = template.max_count, "prewarmed");
            self.emit(PoolEvent::Prewarmed {
                kind: template.kind,
                count: template.max_count,
            });
        }
        tracing::info!(
            "Pool prewarmed: {} entries across {} kinds",
            total,
            self.registry.len()
        );
        Ok(())
    }

    /// Activates an instance of `kind` at `position`.
    ///
    /// Reuses the earliest-created inactive entry of `kind`, or grows the
    /// pool by one and reports exhaustion.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingTemplate`] if `kind` was never registered
    /// - [`ConfigError::NotPrewarmed`] if [`prewarm`](Self::prewarm) has not run
    pub fn acquire(&self, position: Vec2, kind: BulletKind) -> PoolResult<PoolHandle> {
        let template = self.registry.template_for(kind)?;

        let mut state = self.state.lock();
        if !state.prewarmed {
            return Err(ConfigError::NotPrewarmed.into());
        }

        let free = state
            .entries
            .iter_mut()
            .enumerate()
            .find(|(_, entry)| !entry.active && entry.kind == kind);
        if let Some((index, entry)) = free {
            return Ok(entry.activate(index, position));
        }

        let mut entry = PoolEntry::new(self.source.produce(template), kind);
        let index = state.entries.len();
        let handle = entry.activate(index, position);
        state.push(entry);
        state.grown += 1;
        let live_count = state.counts[kind.index()];
        drop(state);

        let event = PoolEvent::exhausted(kind, live_count);
        if let PoolEvent::Exhausted { message, .. } = &event {
            tracing::warn!(kind = %kind, live_count, "{}", message);
        }
        self.emit(event);
        Ok(handle)
    }

    /// Activates an instance of `kind` at the spawn location `location`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::IndexOutOfRange`](crate::PoolError::IndexOutOfRange)
    ///   if `location` is not in the location list; the pool is untouched
    /// - Everything [`acquire`](Self::acquire) can return
    pub fn acquire_at(&self, location: usize, kind: BulletKind) -> PoolResult<PoolHandle> {
        let position = self.locations.resolve(location)?;
        self.acquire(position, kind)
    }

    /// Returns an instance to the inactive set.
    ///
    /// Returns `true` if the entry went from active to inactive. Releasing
    /// an inactive entry, a stale handle or an unknown handle does nothing.
    pub fn release(&self, handle: PoolHandle) -> bool {
        self.state.lock().release(handle)
    }

    /// Releases every handle pending on a region-exit channel.
    ///
    /// Returns the number of entries that actually went inactive.
    pub fn drain_exits(&self, exits: &ExitReceiver) -> usize {
        let mut state = self.state.lock();
        exits.try_iter().filter(|&handle| state.release(handle)).count()
    }

    /// Moves an active instance. Returns `false` for stale or unknown handles.
    pub fn set_position(&self, handle: PoolHandle, position: Vec2) -> bool {
        let mut state = self.state.lock();
        match state.entries.get_mut(handle.index()) {
            Some(entry) if entry.active && entry.is_current(handle) => {
                entry.position = position;
                true
            }
            _ => false,
        }
    }

    /// Runs `f` on the instance behind `handle`.
    ///
    /// Returns `None` if the handle is stale or unknown. `f` runs with the
    /// pool lock held.
    pub fn with_instance<R>(
        &self,
        handle: PoolHandle,
        f: impl FnOnce(&mut S::Instance) -> R,
    ) -> Option<R> {
        let mut state = self.state.lock();
        let entry = state.entries.get_mut(handle.index())?;
        if !entry.is_current(handle) {
            return None;
        }
        Some(f(&mut entry.instance))
    }

    /// State of the entry behind `handle`, if the handle is current.
    #[must_use]
    pub fn entry(&self, handle: PoolHandle) -> Option<EntrySnapshot> {
        let state = self.state.lock();
        state
            .entries
            .get(handle.index())
            .filter(|entry| entry.is_current(handle))
            .map(|entry| entry.snapshot(handle.index()))
    }

    /// State of every entry, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        let state = self.state.lock();
        state
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.snapshot(index))
            .collect()
    }

    /// Handles of every active entry, in insertion order.
    #[must_use]
    pub fn active_handles(&self) -> Vec<PoolHandle> {
        self.snapshot()
            .into_iter()
            .filter(|s| s.active)
            .map(|s| s.handle)
            .collect()
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// True if the pool holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once [`prewarm`](Self::prewarm) has completed.
    #[must_use]
    pub fn is_prewarmed(&self) -> bool {
        self.state.lock().prewarmed
    }

    /// Number of entries of `kind`.
    #[must_use]
    pub fn count_of(&self, kind: BulletKind) -> usize {
        self.state.lock().counts[kind.index()]
    }

    /// Number of active entries of `kind`.
    #[must_use]
    pub fn active_count(&self, kind: BulletKind) -> usize {
        let state = self.state.lock();
        state
            .entries
            .iter()
            .filter(|e| e.kind == kind && e.active)
            .count()
    }

    /// Number of inactive entries of `kind`.
    #[must_use]
    pub fn inactive_count(&self, kind: BulletKind) -> usize {
        let state = self.state.lock();
        state
            .entries
            .iter()
            .filter(|e| e.kind == kind && !e.active)
            .count()
    }

    /// Entry counts across all kinds.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let state = self.state.lock();
        let active = state.entries.iter().filter(|e| e.active).count();
        PoolStats {
            total: state.entries.len(),
            active,
            inactive: state.entries.len() - active,
            grown: state.grown,
        }
    }

    /// The template registry.
    #[must_use]
    pub const fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// The spawn location list.
    #[must_use]
    pub const fn locations(&self) -> &SpawnLocations {
        &self.locations
    }

    fn emit(&self, event: PoolEvent) {
        if let Some(events) = &self.events {
            if !events.send(event) {
                tracing::debug!("pool event dropped, diagnostic bus full");
            }
        }
    }
}
