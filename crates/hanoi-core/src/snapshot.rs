//! Versioned snapshot of a rotation scheduler's mutable state.
//!
//! Stored form (JSON):
//!
//! ```json
//! {"version":1,"n_pools":4,"tapes_per_pool":2,
//!  "stack":[{"verb":"execute","pool":2},{"verb":"emit","pool":3}],
//!  "tapes":[1,0,0,1]}
//! ```
//!
//! `stack` is listed bottom-to-top: the last record is popped first.

use serde::{Deserialize, Serialize};

use crate::error::{RotationError, RotationResult};
use crate::types::{Frame, PoolIndex, TapeIndex};

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted scheduler state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSnapshot {
    pub version: u32,
    pub n_pools: usize,
    pub tapes_per_pool: usize,
    pub stack: Vec<FrameRecord>,
    pub tapes: Vec<TapeIndex>,
}

/// Wire form of a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub verb: Verb,
    pub pool: PoolIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Execute,
    Emit,
}

impl From<Frame> for FrameRecord {
    fn from(frame: Frame) -> Self {
        match frame {
            Frame::Execute(pool) => FrameRecord {
                verb: Verb::Execute,
                pool,
            },
            Frame::Emit(pool) => FrameRecord {
                verb: Verb::Emit,
                pool,
            },
        }
    }
}

impl From<FrameRecord> for Frame {
    fn from(record: FrameRecord) -> Self {
        match record.verb {
            Verb::Execute => Frame::Execute(record.pool),
            Verb::Emit => Frame::Emit(record.pool),
        }
    }
}

impl RotationSnapshot {
    /// Check the snapshot against its own declared configuration.
    pub fn validate(&self) -> RotationResult<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(RotationError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        if self.n_pools == 0 {
            return Err(malformed("n_pools must be at least 1"));
        }
        if self.tapes_per_pool == 0 {
            return Err(malformed("tapes_per_pool must be at least 1"));
        }
        if self.tapes.len() != self.n_pools {
            return Err(malformed(format!(
                "expected {} tape counters, found {}",
                self.n_pools,
                self.tapes.len()
            )));
        }
        if let Some((pool, tape)) = self
            .tapes
            .iter()
            .enumerate()
            .find(|(_, tape)| **tape >= self.tapes_per_pool)
        {
            return Err(malformed(format!(
                "tape counter {tape} for pool {pool} is out of range (tapes_per_pool = {})",
                self.tapes_per_pool
            )));
        }
        if self.stack.len() > 2 * self.n_pools {
            return Err(malformed(format!(
                "stack holds {} frames, more than 2 * n_pools = {}",
                self.stack.len(),
                2 * self.n_pools
            )));
        }
        if let Some((depth, record)) = self
            .stack
            .iter()
            .enumerate()
            .find(|(_, record)| record.pool >= self.n_pools)
        {
            return Err(malformed(format!(
                "stack frame {depth} references pool {} (n_pools = {})",
                record.pool, self.n_pools
            )));
        }
        self.check_stack_shape()
    }

    /// Reject stacks the sequencer could never have left behind.
    ///
    /// Between calls, the stack read bottom-to-top is a run of
    /// `Execute(p-1), Emit(p)` pairs with strictly decreasing `p`, the first
    /// `p` at most `n_pools - 1`. It may end with a single `Execute(j)` below
    /// the last pair's `p`, or with `Emit(0)` right above an
    /// `Execute(0), Emit(1)` pair. Every such stack stays within
    /// `2 * n_pools - 1` frames across further calls.
    fn check_stack_shape(&self) -> RotationResult<()> {
        let frames: Vec<Frame> = self.stack.iter().copied().map(Frame::from).collect();
        // Exclusive upper bound for the next pair's emitted pool.
        let mut bound = self.n_pools;
        let mut pairs = 0;
        let mut i = 0;
        while let [Frame::Execute(left), Frame::Emit(pool), ..] = &frames[i..] {
            let (left, pool) = (*left, *pool);
            if pool == 0 || left != pool - 1 || pool >= bound {
                break;
            }
            bound = pool;
            pairs += 1;
            i += 2;
        }

        match &frames[i..] {
            [] => Ok(()),
            [Frame::Execute(pool)] if *pool < bound => Ok(()),
            [Frame::Emit(0)] if pairs > 0 && bound == 1 => Ok(()),
            _ => Err(malformed(format!(
                "stack is not a reachable rotation state (unexpected frame at position {i})"
            ))),
        }
    }

    /// Encode as compact JSON bytes.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decode from JSON bytes. Structure only; see [`RotationSnapshot::validate`].
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

fn malformed(msg: impl Into<String>) -> RotationError {
    RotationError::MalformedSnapshot(msg.into())
}
