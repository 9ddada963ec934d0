//! # Stage
//!
//! Owns one pool and the spawners that feed on it. A stage is built from a
//! validated [`StageConfig`], pre-warms its pool immediately, and then runs
//! every spawner as its own task while a tick loop applies region exits and
//! collects pool diagnostics.

use std::sync::Arc;
use std::time::Duration;

use barrage_core::{
    exit_channel, EventBus, EventReceiver, ExitReceiver, ExitSender, Pool, PoolStats,
};
use barrage_shared::EventType;
use barrage_spawner::{SpawnReport, Spawner, SpawnerConfig, SpawnerError, SpawnerHandle};
use tokio::time::{Instant, MissedTickBehavior};

use crate::bullet::BulletFactory;
use crate::config::StageConfig;
use crate::error::{StageError, StageResult};
use crate::region::RegionWatcher;

/// Diagnostic events buffered between ticks.
const EVENT_CAPACITY: usize = 1024;

/// Pool type used by stages.
pub type BulletPool = Pool<Arc<BulletFactory>>;

/// What one tick observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Exits posted by the region watcher.
    pub exits_posted: usize,
    /// Entries that went inactive.
    pub released: usize,
    /// Exhaustion events received. The event bus drops events once it
    /// holds more than its capacity, so this can undercount a burst.
    pub exhausted: usize,
}

/// Result of [`Stage::run`].
#[derive(Debug, Default)]
pub struct StageSummary {
    /// Reports of spawners that ended normally, in start order.
    pub reports: Vec<SpawnReport>,
    /// Spawners that aborted.
    pub failures: Vec<SpawnerError>,
    /// Entries released over the run.
    pub released: usize,
    /// Entries grown during the run, one per exhaustion. Taken from the
    /// pool's counters, so it is exact even when the event bus overflows.
    pub exhausted: usize,
    /// Pool counts after the last tick.
    pub stats: PoolStats,
    /// Ticks executed.
    pub ticks: u64,
}

impl StageSummary {
    /// Total successful spawns across all spawners.
    #[must_use]
    pub fn acquisitions(&self) -> usize {
        self.reports.iter().map(|r| r.acquisitions).sum()
    }

    fn absorb(&mut self, tick: TickReport) {
        self.released += tick.released;
    }
}

/// A pool, its spawners and the plumbing between them.
pub struct Stage {
    pool: Arc<BulletPool>,
    factory: Arc<BulletFactory>,
    spawners: Vec<SpawnerConfig>,
    events: EventReceiver,
    exit_sender: ExitSender,
    exits: ExitReceiver,
    watcher: Option<RegionWatcher>,
}

impl Stage {
    /// Builds the pool and pre-warms it.
    ///
    /// # Errors
    ///
    /// Fails if pre-warm fails.
    pub fn build(config: StageConfig) -> StageResult<Self> {
        let StageConfig {
            registry,
            locations,
            spawners,
            region,
        } = config;

        let factory = Arc::new(BulletFactory::new());
        let (event_sender, events) = EventBus::create_pair(EVENT_CAPACITY);
        let pool = Pool::new(registry, Arc::clone(&factory))
            .with_locations(locations)
            .with_events(event_sender);
        pool.prewarm()?;

        let (exit_sender, exits) = exit_channel();
        let watcher = region.map(|r| RegionWatcher::new(r, exit_sender.clone()));

        tracing::info!(
            entries = pool.len(),
            spawners = spawners.len(),
            bounded = watcher.is_some(),
            "Stage ready"
        );

        Ok(Self {
            pool: Arc::new(pool),
            factory,
            spawners,
            events,
            exit_sender,
            exits,
            watcher,
        })
    }

    /// The shared pool.
    #[must_use]
    pub fn pool(&self) -> &Arc<BulletPool> {
        &self.pool
    }

    /// Spawn sequences, in start order.
    #[must_use]
    pub fn spawners(&self) -> &[SpawnerConfig] {
        &self.spawners
    }

    /// Bullets constructed so far, pre-warm included.
    #[must_use]
    pub fn bullets_created(&self) -> u64 {
        self.factory.created()
    }

    /// Sender for exits decided outside the region watcher.
    #[must_use]
    pub fn exit_sender(&self) -> ExitSender {
        self.exit_sender.clone()
    }

    /// Starts every spawner. Must be called inside a tokio runtime.
    #[must_use]
    pub fn start(&self) -> Vec<SpawnerHandle> {
        self.spawners
            .iter()
            .map(|config| Spawner::new(config.clone(), Arc::clone(&self.pool)).start())
            .collect()
    }

    /// Sweeps the region, applies pending exits and drains diagnostics.
    pub fn tick(&self) -> TickReport {
        let exits_posted = self
            .watcher
            .as_ref()
            .map_or(0, |watcher| watcher.sweep(&self.pool));
        let released = self.pool.drain_exits(&self.exits);

        let mut exhausted = 0;
        for event in self.events.drain() {
            match event.event_type() {
                EventType::Exhausted => exhausted += 1,
                EventType::Prewarmed => {
                    tracing::debug!(kind = %event.kind(), "prewarmed");
                }
            }
        }

        TickReport {
            exits_posted,
            released,
            exhausted,
        }
    }

    /// Runs every spawner to the end, ticking every `tick`.
    ///
    /// `on_tick` runs before each tick with the elapsed tick length; it is
    /// where instances get moved. With a `limit`, spawners still running
    /// when it passes are stopped. Looping spawners without a limit run
    /// until the task is dropped.
    ///
    /// # Errors
    ///
    /// [`StageError::InvalidTick`] if `tick` is zero. No spawner is started
    /// in that case.
    pub async fn run<F>(
        &self,
        limit: Option<Duration>,
        tick: Duration,
        mut on_tick: F,
    ) -> StageResult<StageSummary>
    where
        F: FnMut(&BulletPool, Duration),
    {
        if tick.is_zero() {
            return Err(StageError::InvalidTick);
        }

        let grown_before = self.pool.stats().grown;
        let handles = self.start();
        let deadline = limit.map(|l| Instant::now() + l);
        let mut summary = StageSummary::default();

        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            on_tick(&self.pool, tick);
            summary.absorb(self.tick());
            summary.ticks += 1;

            if handles.iter().all(SpawnerHandle::is_finished) {
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                tracing::info!("Stage time limit reached");
                break;
            }
        }

        for handle in &handles {
            handle.stop();
        }
        for handle in handles {
            match handle.join().await {
                Ok(report) => summary.reports.push(report),
                Err(err) => summary.failures.push(err),
            }
        }

        summary.absorb(self.tick());
        summary.stats = self.pool.stats();
        summary.exhausted = summary.stats.grown - grown_before;
        tracing::info!(
            spawned = summary.acquisitions(),
            released = summary.released,
            exhausted = summary.exhausted,
            total = summary.stats.total,
            grown = summary.stats.grown,
            "Stage finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_shared::{BulletKind, Vec2};

    const STAGE: &str = r#"
[region]
min = [-10.0, -10.0]
max = [10.0, 10.0]

[[templates]]
kind = "Hamon"
prototype = "bullets/hamon"
max_count = 2

[[locations]]
name = "top"
position = [0.0, 8.0]

[[spawners]]
name = "opening"

[[spawners.entries]]
kind = "Hamon"
cooldown_secs = 1.0
location_name = "top"

[[spawners.entries]]
kind = "Hamon"
cooldown_secs = 1.0
position = [20.0, 0.0]
"#;

    fn stage() -> Stage {
        Stage::build(StageConfig::from_toml_str(STAGE).unwrap()).unwrap()
    }

    #[test]
    fn test_build_prewarms() {
        let stage = stage();
        assert_eq!(stage.pool().inactive_count(BulletKind::Hamon), 2);
        assert_eq!(stage.bullets_created(), 2);
        assert_eq!(stage.tick(), TickReport::default());
    }

    #[test]
    fn test_tick_releases_bullets_outside_region() {
        let stage = stage();
        stage.pool().acquire(Vec2::new(0.0, 0.0), BulletKind::Hamon).unwrap();
        stage.pool().acquire(Vec2::new(0.0, 11.0), BulletKind::Hamon).unwrap();

        let tick = stage.tick();
        assert_eq!(tick.exits_posted, 1);
        assert_eq!(tick.released, 1);
        assert_eq!(stage.pool().active_count(BulletKind::Hamon), 1);
    }

    #[test]
    fn test_external_exits_are_applied() {
        let stage = stage();
        let handle = stage.pool().acquire(Vec2::ZERO, BulletKind::Hamon).unwrap();
        assert!(stage.exit_sender().exit(handle));
        assert_eq!(stage.tick().released, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_completes() {
        let stage = stage();
        let summary = stage
            .run(None, Duration::from_millis(100), |_, _| {})
            .await
            .unwrap();

        assert!(summary.failures.is_empty());
        assert_eq!(summary.acquisitions(), 2);
        // The second bullet spawns outside the region and is released.
        assert_eq!(summary.released, 1);
        assert_eq!(summary.exhausted, 0);
        assert_eq!(summary.stats.total, 2);
        assert_eq!(summary.stats.active, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_rejects_zero_tick() {
        let stage = stage();
        let result = stage
            .run(Some(Duration::from_secs(1)), Duration::ZERO, |_, _| {})
            .await;
        assert!(matches!(result, Err(StageError::InvalidTick)));
        assert_eq!(stage.pool().active_count(BulletKind::Hamon), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_count_survives_event_overflow() {
        let config = StageConfig::from_toml_str(
            "[[templates]]\nkind = \"Hamon\"\nprototype = \"h\"\nmax_count = 2\n",
        )
        .unwrap();
        let stage = Stage::build(config).unwrap();

        // One burst, larger than the event bus, inside a single tick.
        let burst = EVENT_CAPACITY + 100;
        let mut fired = false;
        let summary = stage
            .run(None, Duration::from_millis(10), |pool, _| {
                if !fired {
                    fired = true;
                    for _ in 0..burst {
                        pool.acquire(Vec2::ZERO, BulletKind::Hamon).unwrap();
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(summary.stats.grown, burst - 2);
        assert_eq!(summary.exhausted, burst - 2);
    }
}
