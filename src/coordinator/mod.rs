//! Coordinator module
//!
//! Drives the batches of a run: for each trials-per-worker value in the
//! schedule it allocates fresh seeds, runs the parallel sampler, and combines
//! the partial results. Each finished batch is handed to a caller-supplied
//! sink (the CLI prints a table row; tests collect reports).
//!
//! Seed allocation is sequential and finishes before the batch's workers are
//! launched. Any error aborts the remaining batches.

use crate::config::Config;
use crate::seed::{self, Seed, SeedAllocator, SeedSource};
use crate::sampler::ParallelSampler;
use crate::stats::aggregator::{Aggregator, FinalReport};
use crate::Result;
use anyhow::Context;
use std::sync::Arc;

/// One finished batch: the seeds it used and its report
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Zero-based position in the schedule
    pub index: usize,
    pub seeds: Vec<Seed>,
    pub report: FinalReport,
}

/// Runs every batch of a configuration on the local machine
pub struct LocalCoordinator {
    config: Arc<Config>,
    allocator: SeedAllocator<Box<dyn SeedSource>>,
    sampler: ParallelSampler,
}

impl LocalCoordinator {
    /// Create a coordinator using the seed source named in the configuration
    pub fn new(config: Arc<Config>) -> Self {
        let source = seed::source_for(config.seeds.source, &config.seeds.fixed);
        Self::with_seed_source(config, source)
    }

    /// Create a coordinator with an explicit seed source
    pub fn with_seed_source(config: Arc<Config>, source: Box<dyn SeedSource>) -> Self {
        let sampler = ParallelSampler::new(config.sampler.workers)
            .with_classifier(config.sampler.classifier)
            .with_executor(config.sampler.executor);

        Self {
            config,
            allocator: SeedAllocator::new(source),
            sampler,
        }
    }

    /// Name of the seed source in use
    pub fn seed_source_name(&self) -> &'static str {
        self.allocator.source_name()
    }

    /// Allocate seeds for one batch
    pub fn allocate_seeds(&mut self) -> Result<Vec<Seed>> {
        self.allocator
            .allocate(self.config.sampler.workers)
            .context("Seed allocation failed")
    }

    /// Run one batch with already-allocated seeds
    pub fn run_batch(&self, seeds: &[Seed], trials_per_worker: i64) -> Result<FinalReport> {
        let run = self.sampler
            .run_timed(seeds, trials_per_worker)
            .with_context(|| format!("Sampling {} trials per worker failed", trials_per_worker))?;

        let report = Aggregator::combine_run(run).context("Aggregation failed")?;

        tracing::info!(
            workers = report.workers(),
            trials_per_worker,
            heads = report.heads(),
            tails = report.tails(),
            chi_square = report.chi_square(),
            fair = report.is_consistent_with_fair_coin(),
            "batch complete"
        );

        Ok(report)
    }

    /// Run every batch in the schedule, passing each outcome to `sink`
    ///
    /// `before_batch` sees the seeds of a batch before its workers launch (the
    /// CLI uses it for seed listings and stream previews).
    pub fn run<B, S>(&mut self, mut before_batch: B, mut sink: S) -> Result<Vec<BatchOutcome>>
    where
        B: FnMut(usize, &[Seed]) -> Result<()>,
        S: FnMut(&BatchOutcome) -> Result<()>,
    {
        let schedule = self.config.sampler.batch_schedule();
        tracing::debug!(?schedule, source = self.seed_source_name(), "starting run");

        let mut outcomes = Vec::with_capacity(schedule.len());
        for (index, &trials) in schedule.iter().enumerate() {
            let seeds = self.allocate_seeds()?;
            before_batch(index, &seeds)?;

            let report = self.run_batch(&seeds, trials)?;
            let outcome = BatchOutcome { index, seeds, report };
            sink(&outcome)?;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
