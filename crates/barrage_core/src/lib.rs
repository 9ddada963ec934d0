//! # BARRAGE Core
//!
//! Object reuse for bullet-heavy stages. Bullets are short-lived and come in
//! waves; allocating and dropping each one churns memory exactly when the
//! frame budget is tightest. This crate keeps them instead.
//!
//! ## Architecture Rules
//!
//! 1. **Pre-warm at startup** - Every kind gets its configured count up front
//! 2. **Never fail a spawn** - Missing capacity grows the pool and warns
//! 3. **Never shrink** - Entries live as long as the pool
//! 4. **No globals** - A pool is a value, shared explicitly by `Arc`
//!
//! ## Example
//!
//! ```rust,ignore
//! use barrage_core::{InstanceTemplate, Pool, TemplateRegistry, FnPrototypes};
//! use barrage_shared::{BulletKind, Vec2};
//!
//! let registry = TemplateRegistry::from_templates([
//!     InstanceTemplate::new(BulletKind::Hamon, "bullets/hamon", 32),
//! ])?;
//! let pool = Pool::new(registry, FnPrototypes::new(|t| Bullet::from(t)));
//! pool.prewarm()?;
//!
//! let handle = pool.acquire(Vec2::new(0.0, 4.0), BulletKind::Hamon)?;
//! pool.release(handle);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod events;
pub mod locations;
pub mod pool;
pub mod prototype;
pub mod registry;
pub mod signal;

pub use error::{ConfigError, ConfigResult, PoolError, PoolResult};
pub use events::{EventBus, EventReceiver, EventSender};
pub use locations::{SpawnLocation, SpawnLocations};
pub use pool::{EntrySnapshot, Pool, PoolHandle, PoolStats};
pub use prototype::{FnPrototypes, PrototypeSource};
pub use registry::{InstanceTemplate, TemplateRegistry};
pub use signal::{exit_channel, ExitReceiver, ExitSender};
