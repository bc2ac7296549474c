//! hanoi-core — Towers of Hanoi backup rotation.
//!
//! Produces an infinite, deterministic sequence of `(pool, tape)`
//! assignments. Pool selection follows the recursive Hanoi move order,
//! unfolded lazily with an explicit frame stack so memory stays bounded by
//! the number of pools. Tapes are handed out round-robin within each pool.
//!
//! # Architecture
//!
//! ```text
//! RotationScheduler
//!   ├── PoolSequencer (frame stack → next pool)
//!   └── TapeAllocator (per-pool round-robin counters)
//! ```
//!
//! The scheduler's full mutable state round-trips through
//! [`RotationSnapshot`], which persistence layers store under a name.

pub mod config;
pub mod error;
pub mod retention;
pub mod rotation;
pub mod sequencer;
pub mod snapshot;
pub mod tapes;
pub mod types;

pub use config::{HanoiConfig, RotationConfig};
pub use error::{RotationError, RotationResult};
pub use retention::{RetentionSummary, RetentionTracker};
pub use rotation::RotationScheduler;
pub use sequencer::PoolSequencer;
pub use snapshot::{FrameRecord, RotationSnapshot, SNAPSHOT_VERSION, Verb};
pub use tapes::TapeAllocator;
pub use types::*;
