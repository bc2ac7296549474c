//! RotationScheduler — pool sequencing plus tape allocation.
//!
//! `next()` is the only mutation: pick the next pool from the
//! [`PoolSequencer`], then that pool's next tape from the [`TapeAllocator`].
//! The whole state can be captured with [`RotationScheduler::snapshot`] and
//! resumed with [`RotationScheduler::restore`]; a restored scheduler emits
//! exactly what the snapshotted one would have emitted next.

use tracing::debug;

use crate::config::RotationConfig;
use crate::error::RotationResult;
use crate::sequencer::PoolSequencer;
use crate::snapshot::{FrameRecord, RotationSnapshot, SNAPSHOT_VERSION};
use crate::tapes::TapeAllocator;
use crate::types::{Assignment, Frame};

/// Deterministic Hanoi backup rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationScheduler {
    config: RotationConfig,
    pools: PoolSequencer,
    tapes: TapeAllocator,
}

impl RotationScheduler {
    /// Start a fresh rotation.
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            pools: PoolSequencer::new(config),
            tapes: TapeAllocator::new(config),
        }
    }

    /// Compute the next backup assignment.
    pub fn next(&mut self) -> Assignment {
        let pool = self.pools.next_pool();
        let tape = self.tapes.next_tape(pool);
        Assignment { pool, tape }
    }

    /// The next `count` assignments, without advancing this scheduler.
    pub fn peek(&self, count: usize) -> Vec<Assignment> {
        let mut ahead = self.clone();
        (0..count).map(|_| ahead.next()).collect()
    }

    pub fn config(&self) -> RotationConfig {
        self.config
    }

    /// Pending frames in the pool sequencer.
    pub fn stack_depth(&self) -> usize {
        self.pools.stack_depth()
    }

    /// Capture the full mutable state.
    pub fn snapshot(&self) -> RotationSnapshot {
        RotationSnapshot {
            version: SNAPSHOT_VERSION,
            n_pools: self.config.n_pools(),
            tapes_per_pool: self.config.tapes_per_pool(),
            stack: self
                .pools
                .frames()
                .iter()
                .copied()
                .map(FrameRecord::from)
                .collect(),
            tapes: self.tapes.counters().to_vec(),
        }
    }

    /// Rebuild a scheduler from a snapshot, rejecting malformed state.
    pub fn restore(snapshot: RotationSnapshot) -> RotationResult<Self> {
        snapshot.validate()?;
        let config = RotationConfig::new(snapshot.n_pools, snapshot.tapes_per_pool)?;
        let stack: Vec<Frame> = snapshot.stack.into_iter().map(Frame::from).collect();
        debug!(
            n_pools = config.n_pools(),
            tapes_per_pool = config.tapes_per_pool(),
            depth = stack.len(),
            "rotation restored from snapshot"
        );
        Ok(Self {
            config,
            pools: PoolSequencer::from_frames(config.n_pools(), stack),
            tapes: TapeAllocator::from_counters(config.tapes_per_pool(), snapshot.tapes),
        })
    }
}

/// Endless stream of assignments; never returns `None`.
impl Iterator for RotationScheduler {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        Some(RotationScheduler::next(self))
    }
}
