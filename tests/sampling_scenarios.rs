//! End-to-end sampling scenarios: seeds in, report out

use approx::assert_relative_eq;
use flipstat::distribution::{Coin, Outcome};
use flipstat::sampler::ParallelSampler;
use flipstat::seed::{duplicate_count, OsEntropy, SeedAllocator};
use flipstat::stats::aggregator::Aggregator;
use flipstat::SamplerError;

/// Deterministic test coin: heads, tails, heads, tails, ...
struct AlternatingCoin {
    heads_next: bool,
}

impl AlternatingCoin {
    fn new() -> Self {
        Self { heads_next: true }
    }
}

impl Coin for AlternatingCoin {
    fn flip(&mut self) -> Outcome {
        let outcome = if self.heads_next { Outcome::Heads } else { Outcome::Tails };
        self.heads_next = !self.heads_next;
        outcome
    }
}

struct HeadsOnly;

impl Coin for HeadsOnly {
    fn flip(&mut self) -> Outcome {
        Outcome::Heads
    }
}

#[test]
fn four_workers_alternating_coin_is_balanced() {
    let mut allocator = SeedAllocator::new(OsEntropy);
    let seeds = allocator.allocate(4).unwrap();

    let sampler = ParallelSampler::new(4);
    let run = sampler
        .run_timed_with(&seeds, 256, |_| AlternatingCoin::new())
        .unwrap();
    let report = Aggregator::combine_run(run).unwrap();

    assert_eq!(report.workers(), 4);
    assert_eq!(report.total(), 1024);
    assert_eq!(report.heads(), 512);
    assert_eq!(report.tails(), 512);
    assert_eq!(report.chi_square(), 0.0);
    assert!(report.is_consistent_with_fair_coin());
}

#[test]
fn single_forced_heads_flip() {
    let sampler = ParallelSampler::new(1);
    let results = sampler.run_with(&[99], 1, |_| HeadsOnly).unwrap();
    let report = Aggregator::combine(results).unwrap();

    assert_eq!(report.heads(), 1);
    assert_eq!(report.tails(), 0);
    assert_relative_eq!(report.chi_square(), 1.0);
}

#[test]
fn seed_count_mismatch_is_reported() {
    let sampler = ParallelSampler::new(4);
    let err = sampler.run(&[1, 2], 10).unwrap_err();
    assert_eq!(err, SamplerError::SeedCountMismatch { expected: 4, actual: 2 });
}

#[test]
fn zero_trials_give_zero_statistic() {
    let mut allocator = SeedAllocator::new(OsEntropy);
    let seeds = allocator.allocate(3).unwrap();

    let results = ParallelSampler::new(3).run(&seeds, 0).unwrap();
    let report = Aggregator::combine(results).unwrap();

    assert_eq!(report.total(), 0);
    assert_eq!(report.chi_square(), 0.0);
}

#[test]
fn totals_match_workers_times_trials() {
    for workers in 1..=6 {
        for &trials in &[0i64, 1, 17, 1000] {
            let seeds: Vec<u64> = (0..workers as u64).map(|s| s * 7919 + 1).collect();
            let results = ParallelSampler::new(workers).run(&seeds, trials).unwrap();

            assert_eq!(results.len(), workers);
            let total: u64 = results.iter().map(|r| r.total()).sum();
            assert_eq!(total, workers as u64 * trials as u64);
        }
    }
}

#[test]
fn os_seeds_never_repeat_within_an_allocation() {
    let mut allocator = SeedAllocator::new(OsEntropy);
    for _ in 0..1000 {
        let seeds = allocator.allocate(8).unwrap();
        assert_eq!(seeds.len(), 8);
        assert_eq!(duplicate_count(&seeds), 0);
    }
}

#[test]
fn fair_coin_passes_self_check_on_large_run() {
    // Fixed seeds keep this deterministic
    let seeds = [0x1234, 0x5678, 0x9abc, 0xdef0];
    let results = ParallelSampler::new(4).run(&seeds, 250_000).unwrap();
    let report = Aggregator::combine(results).unwrap();

    assert_eq!(report.total(), 1_000_000);
    let ratio = report.heads() as f64 / report.total() as f64;
    assert!((ratio - 0.5).abs() < 0.005, "heads ratio {}", ratio);
}
