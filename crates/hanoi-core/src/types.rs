//! Shared types for the rotation engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Retention tier. Pool 0 is written most often, the last pool least often.
pub type PoolIndex = usize;

/// Media slot within a pool, cycled round-robin.
pub type TapeIndex = usize;

/// A pending unit of work in the lazy unfolding of the Hanoi recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Expand `H(pool)` into `H(pool-1), emit(pool), H(pool-1)`.
    Execute(PoolIndex),
    /// Yield `pool` as the next value of the sequence.
    Emit(PoolIndex),
}

impl Frame {
    /// Pool index carried by this frame.
    pub fn pool(&self) -> PoolIndex {
        match self {
            Frame::Execute(pool) | Frame::Emit(pool) => *pool,
        }
    }
}

/// One scheduled backup: which pool, and which tape inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub pool: PoolIndex,
    pub tape: TapeIndex,
}

impl Assignment {
    pub fn new(pool: PoolIndex, tape: TapeIndex) -> Self {
        Self { pool, tape }
    }
}

impl From<(PoolIndex, TapeIndex)> for Assignment {
    fn from((pool, tape): (PoolIndex, TapeIndex)) -> Self {
        Self { pool, tape }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.pool, self.tape)
    }
}
