//! # BARRAGE Spawner
//!
//! Timed spawn sequences that feed on a shared reuse pool.
//!
//! A spawner owns its sequence and nothing else. It holds an `Arc` to the
//! pool, asks for one bullet per entry, then waits the entry's cooldown on
//! the tokio timer. Several spawners can run against one pool at once; the
//! pool serialises their requests.
//!
//! ## Example
//!
//! ```rust,ignore
//! use barrage_spawner::{SpawnEntry, Spawner, SpawnerConfig};
//!
//! let wave = SpawnerConfig::new(
//!     "opening",
//!     vec![SpawnEntry::at_location(BulletKind::Hamon, Duration::from_secs(1), 0)],
//!     false,
//! )?;
//! let handle = Spawner::new(wave, Arc::clone(&pool)).start();
//! let report = handle.join().await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod handle;
pub mod sequence;
pub mod spawner;

pub use error::{SpawnerError, SpawnerResult};
pub use handle::SpawnerHandle;
pub use sequence::{cooldown_from_secs, SpawnEntry, SpawnTarget, SpawnerConfig};
pub use spawner::{SpawnOutcome, SpawnReport, Spawner, SpawnerState};
