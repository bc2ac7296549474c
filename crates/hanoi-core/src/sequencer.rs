//! Pool sequencer — lazy unfolding of the Hanoi recursion.
//!
//! The pool order is the depth-first flattening of
//!
//! ```text
//! H(0) = emit(0)
//! H(k) = H(k-1), emit(k), H(k-1)
//! ```
//!
//! preceded by a bootstrap emit of the top pool each time the stack runs
//! dry. Instead of recursing, pending work is kept as [`Frame`]s on an
//! explicit LIFO stack. An `Execute` frame is only expanded when it is
//! popped, so at most `2 * n_pools - 1` frames are ever live.

use tracing::trace;

use crate::config::RotationConfig;
use crate::types::{Frame, PoolIndex};

/// Produces the next pool of the Hanoi rotation, one call at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSequencer {
    n_pools: usize,
    /// Bottom-to-top; the last element is popped first.
    stack: Vec<Frame>,
}

impl PoolSequencer {
    /// Create a sequencer with an empty stack.
    pub fn new(config: RotationConfig) -> Self {
        let n_pools = config.n_pools();
        Self {
            n_pools,
            stack: Vec::with_capacity(2 * n_pools),
        }
    }

    /// Rebuild a sequencer from previously captured frames (bottom-to-top).
    ///
    /// Callers validate the frames first; see [`crate::RotationScheduler::restore`].
    pub(crate) fn from_frames(n_pools: usize, stack: Vec<Frame>) -> Self {
        Self { n_pools, stack }
    }

    /// Return the next pool index in the rotation.
    pub fn next_pool(&mut self) -> PoolIndex {
        loop {
            let Some(frame) = self.stack.pop() else {
                let top = self.n_pools - 1;
                trace!(pool = top, "sequencer stack empty, reseeding");
                self.stack.push(Frame::Execute(top));
                return top;
            };

            match frame {
                Frame::Execute(0) => self.stack.push(Frame::Emit(0)),
                Frame::Execute(pool) => {
                    // Left subtree ends up on top so it is unfolded first.
                    self.stack.push(Frame::Execute(pool - 1));
                    self.stack.push(Frame::Emit(pool));
                    self.stack.push(Frame::Execute(pool - 1));
                }
                Frame::Emit(pool) => return pool,
            }
        }
    }

    /// Number of pools this sequencer rotates over.
    pub fn n_pools(&self) -> usize {
        self.n_pools
    }

    /// Number of pending frames.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Pending frames, bottom-to-top.
    pub fn frames(&self) -> &[Frame] {
        &self.stack
    }
}
