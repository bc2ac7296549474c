//! Behavioural properties of the Hanoi rotation.
//!
//! Exercises the public API only: determinism, resume-after-snapshot,
//! bounded stack growth, tape cycling and pool frequency.

use std::collections::HashMap;

use hanoi_core::*;

fn scheduler(n_pools: usize, tapes_per_pool: usize) -> RotationScheduler {
    RotationScheduler::new(RotationConfig::new(n_pools, tapes_per_pool).unwrap())
}

fn run(s: &mut RotationScheduler, n: usize) -> Vec<Assignment> {
    (0..n).map(|_| s.next()).collect()
}

// ── Determinism ────────────────────────────────────────────────────

#[test]
fn identical_configs_produce_identical_sequences() {
    for (n_pools, tapes) in [(1, 1), (3, 2), (7, 3), (15, 2)] {
        let mut a = scheduler(n_pools, tapes);
        let mut b = scheduler(n_pools, tapes);
        assert_eq!(run(&mut a, 1000), run(&mut b, 1000));
    }
}

// ── Snapshot round-trip ────────────────────────────────────────────

#[test]
fn resume_after_snapshot_matches_uninterrupted_run() {
    let total = 300;
    let mut reference = scheduler(6, 3);
    let expected = run(&mut reference, total);

    for k in [0, 1, 2, 5, 31, 32, 33, 64, 150] {
        let mut first = scheduler(6, 3);
        let mut seen = run(&mut first, k);

        // Through bytes, as a store would.
        let bytes = first.snapshot().to_json().unwrap();
        let snapshot = RotationSnapshot::from_json(&bytes).unwrap();
        let mut resumed = RotationScheduler::restore(snapshot).unwrap();

        seen.extend(run(&mut resumed, total - k));
        assert_eq!(seen, expected, "diverged after restoring at k={k}");
    }
}

#[test]
fn repeated_snapshot_per_call_matches_uninterrupted_run() {
    let mut reference = scheduler(5, 2);
    let expected = run(&mut reference, 100);

    // One process invocation per backup: load, next, save.
    let mut snapshot = scheduler(5, 2).snapshot();
    let mut seen = Vec::new();
    for _ in 0..100 {
        let mut s = RotationScheduler::restore(snapshot).unwrap();
        seen.push(s.next());
        snapshot = s.snapshot();
    }
    assert_eq!(seen, expected);
}

// ── Bounded memory ─────────────────────────────────────────────────

#[test]
fn stack_never_exceeds_twice_pool_count() {
    for n_pools in [1, 2, 4, 9, 15] {
        let mut s = scheduler(n_pools, 2);
        for _ in 0..5000 {
            s.next();
            assert!(s.stack_depth() <= 2 * n_pools);
            // Every reachable state survives validation.
            assert!(s.snapshot().validate().is_ok());
        }
    }
}

#[test]
fn every_accepted_stack_stays_valid_after_next() {
    let n_pools = 3;
    let alphabet: Vec<Frame> = (0..n_pools)
        .flat_map(|p| [Frame::Execute(p), Frame::Emit(p)])
        .collect();

    // All stacks up to the depth limit, bottom-to-top.
    let mut stacks: Vec<Vec<Frame>> = vec![Vec::new()];
    let mut frontier = stacks.clone();
    for _ in 0..2 * n_pools {
        frontier = frontier
            .iter()
            .flat_map(|stack| {
                alphabet.iter().map(move |frame| {
                    let mut longer = stack.clone();
                    longer.push(*frame);
                    longer
                })
            })
            .collect();
        stacks.extend(frontier.iter().cloned());
    }

    let mut accepted = 0;
    for stack in stacks {
        let snapshot = RotationSnapshot {
            version: SNAPSHOT_VERSION,
            n_pools,
            tapes_per_pool: 2,
            stack: stack.iter().copied().map(FrameRecord::from).collect(),
            tapes: vec![0; n_pools],
        };
        let Ok(mut s) = RotationScheduler::restore(snapshot) else {
            continue;
        };
        accepted += 1;
        for step in 0..3 * (1 << n_pools) {
            let a = s.next();
            assert!(a.pool < n_pools);
            assert!(s.stack_depth() < 2 * n_pools, "{stack:?} step {step}");
            let resaved = s.snapshot();
            assert!(
                RotationScheduler::restore(resaved).is_ok(),
                "{stack:?} produced an unloadable snapshot after {step} steps"
            );
        }
    }
    // Every state the sequencer passes through between calls is accepted.
    assert!(accepted >= 1 << n_pools);
}

#[test]
fn unreachable_stack_within_depth_limit_is_rejected() {
    let snapshot = RotationSnapshot {
        version: SNAPSHOT_VERSION,
        n_pools: 2,
        tapes_per_pool: 1,
        stack: vec![FrameRecord::from(Frame::Execute(1)); 4],
        tapes: vec![0, 0],
    };
    assert!(matches!(
        RotationScheduler::restore(snapshot),
        Err(RotationError::MalformedSnapshot(_))
    ));
}

// ── Tapes ──────────────────────────────────────────────────────────

#[test]
fn tapes_stay_in_range_and_cycle_per_pool() {
    let (n_pools, tapes) = (5, 3);
    let mut s = scheduler(n_pools, tapes);
    let mut per_pool: HashMap<usize, Vec<usize>> = HashMap::new();
    for a in run(&mut s, 2000) {
        assert!(a.pool < n_pools);
        assert!(a.tape < tapes);
        per_pool.entry(a.pool).or_default().push(a.tape);
    }
    for (pool, seq) in per_pool {
        for (i, tape) in seq.iter().enumerate() {
            assert_eq!(*tape, i % tapes, "pool {pool} broke round-robin at {i}");
        }
    }
}

// ── Pool frequency ─────────────────────────────────────────────────

#[test]
fn pool_zero_on_every_even_step() {
    for n_pools in 2..=8 {
        let mut s = scheduler(n_pools, 1);
        for (i, a) in run(&mut s, 512).into_iter().enumerate() {
            let step = i + 1;
            assert_eq!(
                a.pool == 0,
                step % 2 == 0,
                "n_pools={n_pools} step={step} pool={}",
                a.pool
            );
        }
    }
}

#[test]
fn higher_pools_are_used_exponentially_less() {
    let n_pools = 6;
    let mut s = scheduler(n_pools, 1);
    let mut counts = vec![0usize; n_pools];
    // Whole number of cycles: one bootstrap emit plus 2^n - 1 per cycle.
    for a in run(&mut s, 4 * (1 << n_pools)) {
        counts[a.pool] += 1;
    }
    for pool in 0..n_pools - 2 {
        assert_eq!(counts[pool], 2 * counts[pool + 1]);
    }
}
