//! # BARRAGE
//!
//! Bullet stages on a reuse pool. A stage file names the bullet templates,
//! the spawn points and the spawn sequences; [`Stage`] turns it into one
//! pre-warmed pool plus a task per sequence.
//!
//! ## Example
//!
//! ```rust,ignore
//! use barrage::{Stage, StageConfig};
//!
//! let stage = Stage::build(StageConfig::from_file("data/stage.toml")?)?;
//! let summary = stage.run(None, Duration::from_millis(16), |_, _| {}).await?;
//! println!("{} spawned, {} grown", summary.acquisitions(), summary.stats.grown);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bullet;
pub mod cli;
pub mod config;
pub mod error;
pub mod region;
pub mod stage;
pub mod telemetry;

pub use bullet::{Bullet, BulletFactory};
pub use config::{kinds_in_use, StageConfig};
pub use error::{StageError, StageResult};
pub use region::{Region, RegionWatcher};
pub use stage::{BulletPool, Stage, StageSummary, TickReport};
