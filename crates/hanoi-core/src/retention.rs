//! Retention simulation.
//!
//! Replays a rotation one backup per day and tracks, for every
//! `(pool, tape)` slot, the day of the backup currently sitting on it.
//! From that it reports how far back the retained history reaches and how
//! the retained backups are spaced.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::RotationConfig;
use crate::rotation::RotationScheduler;
use crate::types::Assignment;

const DAYS_PER_YEAR: f64 = 365.0;

/// Tracks the newest backup day written to each slot.
#[derive(Debug, Clone)]
pub struct RetentionTracker {
    scheduler: RotationScheduler,
    latest: HashMap<Assignment, u64>,
    day: u64,
}

impl RetentionTracker {
    pub fn new(config: RotationConfig) -> Self {
        Self::from_scheduler(RotationScheduler::new(config))
    }

    /// Track retention starting from an existing rotation state.
    pub fn from_scheduler(scheduler: RotationScheduler) -> Self {
        Self {
            scheduler,
            latest: HashMap::new(),
            day: 0,
        }
    }

    /// Run one backup day; returns the slot it was written to.
    pub fn record(&mut self) -> Assignment {
        let slot = self.scheduler.next();
        self.latest.insert(slot, self.day);
        self.day += 1;
        slot
    }

    /// Days recorded so far.
    pub fn days(&self) -> u64 {
        self.day
    }

    pub fn slots_in_use(&self) -> usize {
        self.latest.len()
    }

    /// Days of the retained backups, oldest first.
    pub fn retained_days(&self) -> Vec<u64> {
        let mut days: Vec<u64> = self.latest.values().copied().collect();
        days.sort_unstable();
        days
    }

    /// Newest minus oldest retained backup day.
    pub fn span_days(&self) -> u64 {
        let days = self.latest.values();
        match (days.clone().min(), days.max()) {
            (Some(oldest), Some(newest)) => newest - oldest,
            _ => 0,
        }
    }

    /// Distance between consecutive retained backups, oldest first.
    pub fn gaps(&self) -> Vec<u64> {
        self.retained_days()
            .windows(2)
            .map(|w| w[1] - w[0])
            .collect()
    }

    pub fn summary(&self) -> RetentionSummary {
        let span_days = self.span_days();
        let config = self.scheduler.config();
        RetentionSummary {
            days: self.day,
            slots: config.total_tapes(),
            slots_in_use: self.slots_in_use(),
            span_days,
            span_years: (span_days as f64 / DAYS_PER_YEAR * 100.0).round() / 100.0,
            retained_days: self.retained_days(),
            gaps: self.gaps(),
        }
    }
}

/// Retention picture after a simulated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionSummary {
    pub days: u64,
    /// Total `(pool, tape)` slots in the rotation.
    pub slots: usize,
    pub slots_in_use: usize,
    pub span_days: u64,
    /// `span_days / 365`, rounded to two decimals.
    pub span_years: f64,
    pub retained_days: Vec<u64>,
    pub gaps: Vec<u64>,
}

/// Simulate `days` daily backups on a fresh rotation.
pub fn simulate(config: RotationConfig, days: u64) -> RetentionSummary {
    let mut tracker = RetentionTracker::new(config);
    for _ in 0..days {
        tracker.record();
    }
    tracker.summary()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(n_pools: usize, tapes_per_pool: usize) -> RotationConfig {
        RotationConfig::new(n_pools, tapes_per_pool).unwrap()
    }

    #[test]
    fn empty_run_has_no_span() {
        let summary = simulate(config(4, 1), 0);
        assert_eq!(summary.days, 0);
        assert_eq!(summary.slots_in_use, 0);
        assert_eq!(summary.span_days, 0);
        assert!(summary.gaps.is_empty());
    }

    #[test]
    fn four_pools_after_one_cycle() {
        let summary = simulate(config(4, 1), 16);
        assert_eq!(summary.slots, 4);
        assert_eq!(summary.slots_in_use, 4);
        assert_eq!(summary.retained_days, vec![8, 12, 14, 15]);
        assert_eq!(summary.span_days, 7);
        assert_eq!(summary.gaps, vec![4, 2, 1]);
    }

    #[test]
    fn two_pools_keep_last_two_days() {
        let summary = simulate(config(2, 1), 4);
        assert_eq!(summary.retained_days, vec![2, 3]);
        assert_eq!(summary.span_days, 1);
    }

    #[test]
    fn slots_in_use_never_exceeds_total() {
        let mut tracker = RetentionTracker::new(config(5, 2));
        for _ in 0..200 {
            tracker.record();
            assert!(tracker.slots_in_use() <= 10);
        }
        assert_eq!(tracker.slots_in_use(), 10);
        assert_eq!(tracker.days(), 200);
    }

    #[test]
    fn span_years_rounded_to_two_decimals() {
        let summary = simulate(config(10, 2), 2000);
        let expected = (summary.span_days as f64 / 365.0 * 100.0).round() / 100.0;
        assert_eq!(summary.span_years, expected);
        assert!(summary.span_days > 365);
    }

    #[test]
    fn tracker_from_restored_scheduler_continues_rotation() {
        let mut scheduler = RotationScheduler::new(config(4, 2));
        scheduler.next();
        let expected = scheduler.peek(1)[0];
        let mut tracker = RetentionTracker::from_scheduler(scheduler);
        assert_eq!(tracker.record(), expected);
    }
}
