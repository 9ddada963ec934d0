//! # Spawner
//!
//! Walks a [`SpawnerConfig`] against a shared [`Pool`]:
//!
//! ```text
//! Idle ──start──> Requesting(0) ──> Cooling(0) ──> Requesting(1) ──> ... ──> Idle
//!                      │                 │
//!                      │ config error    │ stop
//!                      ▼                 ▼
//!                    Failed           Stopped
//! ```
//!
//! Each entry is served by exactly one pool request followed by its
//! cooldown. Entries are processed strictly in order. Deactivation is not the
//! spawner's business: bullets come back through the pool's exit channel.
//!
//! The stop signal is checked before every request and raced against every
//! cooldown, so a stopped spawner never issues another request.

use std::sync::Arc;

use barrage_core::{Pool, PoolError, PoolHandle, PoolResult, PrototypeSource};
use tokio::sync::watch;

use crate::error::{SpawnerError, SpawnerResult};
use crate::handle::SpawnerHandle;
use crate::sequence::{SpawnEntry, SpawnTarget, SpawnerConfig};

/// Where a spawner is in its sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnerState {
    /// Not started, or finished a non-looping sequence.
    Idle,
    /// Requesting the bullet for entry `index`.
    Requesting {
        /// Entry being served.
        index: usize,
    },
    /// Waiting out the cooldown of entry `index`.
    Cooling {
        /// Entry whose cooldown is running.
        index: usize,
    },
    /// Stopped on request.
    Stopped,
    /// Aborted by a configuration error.
    Failed,
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// The sequence ran to its end.
    Completed,
    /// The spawner was stopped first.
    Stopped,
}

/// Summary of one spawner run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnReport {
    /// Spawner name.
    pub name: String,
    /// Successful pool requests.
    pub acquisitions: usize,
    /// Entries skipped because their location index was out of range.
    pub skipped: usize,
    /// Completed passes over the sequence.
    pub cycles: usize,
    /// Handle from the most recent request.
    pub last_handle: Option<PoolHandle>,
    /// How the run ended.
    pub outcome: SpawnOutcome,
}

impl SpawnReport {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            acquisitions: 0,
            skipped: 0,
            cycles: 0,
            last_handle: None,
            outcome: SpawnOutcome::Completed,
        }
    }
}

/// Timed client of a shared pool.
pub struct Spawner<S: PrototypeSource> {
    config: SpawnerConfig,
    pool: Arc<Pool<S>>,
    state: watch::Sender<SpawnerState>,
}

impl<S: PrototypeSource> Spawner<S> {
    /// Creates an idle spawner.
    #[must_use]
    pub fn new(config: SpawnerConfig, pool: Arc<Pool<S>>) -> Self {
        let (state, _) = watch::channel(SpawnerState::Idle);
        Self {
            config,
            pool,
            state,
        }
    }

    /// The spawn sequence.
    #[must_use]
    pub const fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SpawnerState {
        *self.state.borrow()
    }

    /// Watches state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SpawnerState> {
        self.state.subscribe()
    }

    /// Runs the sequence until it ends or `stop` turns `true`.
    ///
    /// Entries whose location index is out of range are logged and skipped;
    /// their cooldown is still observed so the sequence keeps its timing.
    ///
    /// # Errors
    ///
    /// [`SpawnerError::Aborted`] when the pool reports a configuration
    /// error (unregistered kind, pool not pre-warmed).
    pub async fn run(&self, mut stop: watch::Receiver<bool>) -> SpawnerResult<SpawnReport> {
        let name = self.config.name();
        let mut report = SpawnReport::new(name);
        tracing::info!(
            "Spawner {:?} started: {} entries over {:?}, looping={}",
            name,
            self.config.entries().len(),
            self.config.cycle_duration(),
            self.config.looping()
        );

        loop {
            for (index, entry) in self.config.entries().iter().enumerate() {
                if *stop.borrow_and_update() {
                    return Ok(self.stopped(report));
                }

                self.state.send_replace(SpawnerState::Requesting { index });
                match self.request(entry) {
                    Ok(handle) => {
                        tracing::debug!(spawner = name, index, kind = %entry.kind, "spawned");
                        report.acquisitions += 1;
                        report.last_handle = Some(handle);
                    }
                    Err(err @ PoolError::IndexOutOfRange { .. }) => {
                        tracing::warn!("Spawner {:?} skipped entry {}: {}", name, index, err);
                        report.skipped += 1;
                    }
                    Err(err) => {
                        tracing::error!("Spawner {:?} aborted at entry {}: {}", name, index, err);
                        self.state.send_replace(SpawnerState::Failed);
                        return Err(SpawnerError::Aborted {
                            name: name.to_string(),
                            index,
                            source: err,
                        });
                    }
                }

                self.state.send_replace(SpawnerState::Cooling { index });
                tokio::select! {
                    biased;
                    () = stop_requested(&mut stop) => return Ok(self.stopped(report)),
                    () = tokio::time::sleep(entry.cooldown) => {}
                }
            }

            report.cycles += 1;
            if !self.config.looping() {
                break;
            }
        }

        self.state.send_replace(SpawnerState::Idle);
        tracing::info!(
            "Spawner {:?} completed: {} spawned, {} skipped",
            name,
            report.acquisitions,
            report.skipped
        );
        Ok(report)
    }

    fn request(&self, entry: &SpawnEntry) -> PoolResult<PoolHandle> {
        match entry.target {
            SpawnTarget::Position(position) => self.pool.acquire(position, entry.kind),
            SpawnTarget::Location(location) => self.pool.acquire_at(location, entry.kind),
        }
    }

    fn stopped(&self, mut report: SpawnReport) -> SpawnReport {
        self.state.send_replace(SpawnerState::Stopped);
        tracing::info!(
            "Spawner {:?} stopped after {} spawns",
            report.name,
            report.acquisitions
        );
        report.outcome = SpawnOutcome::Stopped;
        report
    }
}

impl<S> Spawner<S>
where
    S: PrototypeSource + Send + Sync + 'static,
    S::Instance: Send + 'static,
{
    /// Runs the spawner as a tokio task.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(self) -> SpawnerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let state = self.subscribe();
        let name = self.config.name().to_string();
        let task = tokio::spawn(async move { self.run(stop_rx).await });
        SpawnerHandle::new(name, stop_tx, state, task)
    }
}

/// Resolves once `stop` reads `true`. Never resolves if the sender is gone.
async fn stop_requested(stop: &mut watch::Receiver<bool>) {
    loop {
        if *stop.borrow_and_update() {
            return;
        }
        if stop.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
