//! Per-pool round-robin tape allocation.
//!
//! Each pool has its own counter. Selecting a pool hands out the counter's
//! current tape and advances it, wrapping at `tapes_per_pool`.

use crate::config::RotationConfig;
use crate::types::{PoolIndex, TapeIndex};

/// Round-robin tape counters, one per pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapeAllocator {
    tapes_per_pool: usize,
    counters: Vec<TapeIndex>,
}

impl TapeAllocator {
    /// Create an allocator with every pool's counter at tape 0.
    pub fn new(config: RotationConfig) -> Self {
        Self {
            tapes_per_pool: config.tapes_per_pool(),
            counters: vec![0; config.n_pools()],
        }
    }

    /// Rebuild an allocator from validated counters.
    pub(crate) fn from_counters(tapes_per_pool: usize, counters: Vec<TapeIndex>) -> Self {
        Self {
            tapes_per_pool,
            counters,
        }
    }

    /// Return the current tape for `pool` and advance its counter.
    pub fn next_tape(&mut self, pool: PoolIndex) -> TapeIndex {
        let tape = self.counters[pool];
        debug_assert!(tape < self.tapes_per_pool, "tape counter out of range");
        self.counters[pool] = (tape + 1) % self.tapes_per_pool;
        tape
    }

    /// Tape that the next selection of `pool` will receive.
    pub fn current(&self, pool: PoolIndex) -> TapeIndex {
        self.counters[pool]
    }

    pub fn tapes_per_pool(&self) -> usize {
        self.tapes_per_pool
    }

    /// All counters, indexed by pool.
    pub fn counters(&self) -> &[TapeIndex] {
        &self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocator(n_pools: usize, tapes_per_pool: usize) -> TapeAllocator {
        TapeAllocator::new(RotationConfig::new(n_pools, tapes_per_pool).unwrap())
    }

    #[test]
    fn cycles_through_tapes_per_pool() {
        let mut tapes = allocator(2, 3);

        assert_eq!(tapes.next_tape(0), 0);
        assert_eq!(tapes.next_tape(0), 1);
        assert_eq!(tapes.next_tape(0), 2);
        assert_eq!(tapes.next_tape(0), 0); // wraps
    }

    #[test]
    fn pools_advance_independently() {
        let mut tapes = allocator(3, 2);

        assert_eq!(tapes.next_tape(1), 0);
        assert_eq!(tapes.next_tape(1), 1);
        assert_eq!(tapes.current(0), 0);
        assert_eq!(tapes.current(2), 0);
        assert_eq!(tapes.next_tape(2), 0);
        assert_eq!(tapes.counters(), &[0, 0, 1]);
    }

    #[test]
    fn single_tape_always_zero() {
        let mut tapes = allocator(4, 1);
        for _ in 0..10 {
            assert_eq!(tapes.next_tape(3), 0);
        }
    }

    #[test]
    fn new_sizes_counters_from_config() {
        let tapes = allocator(6, 3);
        assert_eq!(tapes.counters(), &[0; 6]);
        assert_eq!(tapes.tapes_per_pool(), 3);
    }

    #[test]
    fn current_does_not_advance() {
        let mut tapes = allocator(1, 4);
        tapes.next_tape(0);
        assert_eq!(tapes.current(0), 1);
        assert_eq!(tapes.current(0), 1);
        assert_eq!(tapes.next_tape(0), 1);
    }
}
