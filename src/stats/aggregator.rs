//! Result aggregation
//!
//! Reduces the partial results of every worker in a run into a single
//! [`FinalReport`] with totals and a chi-square goodness-of-fit statistic.
//!
//! # Properties
//!
//! - **Order-independent**: totals are sums and the per-worker list is sorted by
//!   worker id, so any permutation of the input gives an identical report
//! - **Consume-once**: results are taken by value; a worker id appearing twice
//!   is rejected
//!
//! # Example
//!
//! ```
//! use flipstat::distribution::Outcome;
//! use flipstat::stats::{Tally, aggregator::Aggregator};
//!
//! let mut a = Tally::new();
//! a.record(Outcome::Heads);
//! let mut b = Tally::new();
//! b.record(Outcome::Tails);
//!
//! let report = Aggregator::combine(vec![a.publish(0, 11), b.publish(1, 22)])?;
//! assert_eq!(report.heads(), 1);
//! assert_eq!(report.tails(), 1);
//! assert_eq!(report.chi_square(), 0.0);
//! # Ok::<(), flipstat::error::SamplerError>(())
//! ```

use crate::error::{SamplerError, SamplerResult};
use crate::sampler::SamplingRun;
use crate::stats::PartialResult;
use std::collections::HashSet;
use std::time::Duration;

/// 95% critical value of the chi-square distribution with one degree of freedom
pub const CHI_SQUARE_CRITICAL_95: f64 = 3.841_458_820_694_124;

/// Chi-square statistic for a two-outcome experiment against a fair coin
///
/// With `T = heads + tails` and `E = T / 2`:
/// `(heads - E)² / E + (tails - E)² / E`.
///
/// Zero trials give `0.0`: there is no evidence against the null hypothesis,
/// and the expected count would otherwise be a zero divisor.
pub fn chi_square(heads: u64, tails: u64) -> f64 {
    let total = (heads + tails) as f64;
    if total == 0.0 {
        return 0.0;
    }

    let expected = 0.5 * total;
    let dh = heads as f64 - expected;
    let dt = tails as f64 - expected;
    (dh * dh) / expected + (dt * dt) / expected
}

/// Final statistics for one sampling run
#[derive(Debug, Clone, PartialEq)]
pub struct FinalReport {
    workers: usize,
    trials_per_worker: u64,
    heads: u64,
    tails: u64,
    chi_square: f64,
    elapsed: Duration,
    per_worker: Vec<PartialResult>,
}

impl FinalReport {
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Trials run by each worker (the largest per-worker total)
    pub fn trials_per_worker(&self) -> u64 {
        self.trials_per_worker
    }

    pub fn heads(&self) -> u64 {
        self.heads
    }

    pub fn tails(&self) -> u64 {
        self.tails
    }

    pub fn total(&self) -> u64 {
        self.heads + self.tails
    }

    pub fn chi_square(&self) -> f64 {
        self.chi_square
    }

    /// Wall-clock time from just before worker launch to just after the join
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Partial results, sorted by worker id
    pub fn per_worker(&self) -> &[PartialResult] {
        &self.per_worker
    }

    /// Whether the fair-coin hypothesis survives at the 5% significance level
    pub fn is_consistent_with_fair_coin(&self) -> bool {
        self.chi_square < CHI_SQUARE_CRITICAL_95
    }
}

/// Fan-in reduction of partial results
pub struct Aggregator;

impl Aggregator {
    /// Combine partial results into a report with zero elapsed time
    ///
    /// # Errors
    ///
    /// - `EmptyResultSet` for an empty input
    /// - `DuplicateWorker` if two results share a worker id
    pub fn combine(results: Vec<PartialResult>) -> SamplerResult<FinalReport> {
        Self::combine_with_elapsed(results, Duration::ZERO)
    }

    /// Combine a timed run, carrying its elapsed time into the report
    pub fn combine_run(run: SamplingRun) -> SamplerResult<FinalReport> {
        let SamplingRun { results, elapsed } = run;
        Self::combine_with_elapsed(results, elapsed)
    }

    fn combine_with_elapsed(
        mut results: Vec<PartialResult>,
        elapsed: Duration,
    ) -> SamplerResult<FinalReport> {
        if results.is_empty() {
            return Err(SamplerError::EmptyResultSet);
        }

        let mut seen = HashSet::with_capacity(results.len());
        for result in &results {
            if !seen.insert(result.worker_id()) {
                return Err(SamplerError::DuplicateWorker(result.worker_id()));
            }
        }

        results.sort_unstable_by_key(|r| r.worker_id());

        let heads: u64 = results.iter().map(|r| r.heads()).sum();
        let tails: u64 = results.iter().map(|r| r.tails()).sum();
        let trials_per_worker = results.iter().map(|r| r.total()).max().unwrap_or(0);

        Ok(FinalReport {
            workers: results.len(),
            trials_per_worker,
            heads,
            tails,
            chi_square: chi_square(heads, tails),
            elapsed,
            per_worker: results,
        })
    }
}
