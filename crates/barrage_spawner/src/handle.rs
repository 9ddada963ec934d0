//! Control handle for a running spawner task.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::{SpawnerError, SpawnerResult};
use crate::spawner::{SpawnReport, SpawnerState};

/// Returned by [`Spawner::start`](crate::Spawner::start).
///
/// Dropping the handle does not stop the spawner; it keeps running
/// detached until its sequence ends.
pub struct SpawnerHandle {
    name: String,
    stop: watch::Sender<bool>,
    state: watch::Receiver<SpawnerState>,
    task: JoinHandle<SpawnerResult<SpawnReport>>,
}

impl SpawnerHandle {
    pub(crate) fn new(
        name: String,
        stop: watch::Sender<bool>,
        state: watch::Receiver<SpawnerState>,
        task: JoinHandle<SpawnerResult<SpawnReport>>,
    ) -> Self {
        Self {
            name,
            stop,
            state,
            task,
        }
    }

    /// Spawner name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asks the spawner to stop. Any pending cooldown is abandoned and no
    /// further request is made. Idempotent.
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }

    /// Latest published state.
    #[must_use]
    pub fn state(&self) -> SpawnerState {
        *self.state.borrow()
    }

    /// Watches state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SpawnerState> {
        self.state.clone()
    }

    /// True once the task has returned.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the spawner to end.
    ///
    /// # Errors
    ///
    /// The spawner's own error, or [`SpawnerError::Join`] if the task
    /// panicked.
    pub async fn join(self) -> SpawnerResult<SpawnReport> {
        self.task
            .await
            .map_err(|e| SpawnerError::Join(e.to_string()))?
    }

    /// Stops the spawner and waits for it.
    ///
    /// # Errors
    ///
    /// See [`join`](Self::join).
    pub async fn stop_and_join(self) -> SpawnerResult<SpawnReport> {
        self.stop();
        self.join().await
    }
}
