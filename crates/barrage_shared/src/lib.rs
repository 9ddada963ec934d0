//! # BARRAGE Shared
//!
//! Common types used by the pool, the spawners and the stage.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `tokio`
//! - `parking_lot`
//! - Anything that owns a thread or a lock
//!
//! If you need runtime behaviour, put it in `barrage_core` or `barrage_spawner`.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod events;
pub mod kind;
pub mod math;

pub use events::{EventType, PoolEvent};
pub use kind::BulletKind;
pub use math::Vec2;
