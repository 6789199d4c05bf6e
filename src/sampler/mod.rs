//! Parallel sampler
//!
//! Runs a fixed pool of workers, one per seed, forked once and joined once.
//! Each worker builds its own coin from its seed on its own thread, so generator
//! state is never shared and no locking is needed during the flip loop. The
//! only synchronization point is the join.
//!
//! # Executors
//!
//! - **Scoped**: one crossbeam scoped thread per worker (default)
//! - **Pool**: a dedicated rayon pool with exactly one thread per worker
//!
//! # Example
//!
//! ```
//! use flipstat::sampler::ParallelSampler;
//!
//! let sampler = ParallelSampler::new(4);
//! let results = sampler.run(&[1, 2, 3, 4], 256)?;
//! assert_eq!(results.len(), 4);
//! assert_eq!(results.iter().map(|r| r.total()).sum::<u64>(), 1024);
//! # Ok::<(), flipstat::error::SamplerError>(())
//! ```

use crate::config::sampling::{Classifier, Executor};
use crate::distribution::{bernoulli::FairCoin, parity::ParityCoin, Coin};
use crate::error::{SamplerError, SamplerResult};
use crate::seed::Seed;
use crate::stats::PartialResult;
use crate::worker::Worker;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Partial results of one run plus the time between launch and join
#[derive(Debug, Clone)]
pub struct SamplingRun {
    pub results: Vec<PartialResult>,
    pub elapsed: Duration,
}

/// Fixed-size fork/join sampler
#[derive(Debug, Clone, Copy)]
pub struct ParallelSampler {
    workers: usize,
    classifier: Classifier,
    executor: Executor,
}

impl ParallelSampler {
    /// Sampler for `workers` workers using the default coin and executor
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            classifier: Classifier::default(),
            executor: Executor::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run one worker per seed with the configured coin
    ///
    /// # Errors
    ///
    /// - `InvalidTrialCount` if `trials_per_worker < 0`
    /// - `SeedCountMismatch` if `seeds.len()` differs from the worker count
    /// - `WorkerPanicked` if any worker fails; no partial set is returned
    /// - `ExecutorUnavailable` if the pool executor cannot start its threads
    pub fn run(&self, seeds: &[Seed], trials_per_worker: i64) -> SamplerResult<Vec<PartialResult>> {
        let classifier = self.classifier;
        self.run_with(seeds, trials_per_worker, move |seed| coin_for(classifier, seed))
    }

    /// Like [`run`](Self::run), measuring wall-clock time around launch and join
    pub fn run_timed(&self, seeds: &[Seed], trials_per_worker: i64) -> SamplerResult<SamplingRun> {
        let classifier = self.classifier;
        self.run_timed_with(seeds, trials_per_worker, move |seed| coin_for(classifier, seed))
    }

    /// Timed run with a caller-supplied coin factory
    pub fn run_timed_with<C, F>(
        &self,
        seeds: &[Seed],
        trials_per_worker: i64,
        make_coin: F,
    ) -> SamplerResult<SamplingRun>
    where
        C: Coin,
        F: Fn(Seed) -> C + Sync,
    {
        let trials = self.validate(seeds, trials_per_worker)?;
        let pool = self.build_pool(seeds.len())?;

        // Pool startup stays outside the timed region so both executors
        // measure launch to join only
        let start = Instant::now();
        let results = self.execute(seeds, trials, &make_coin, pool.as_ref())?;
        let elapsed = start.elapsed();

        tracing::debug!(
            workers = self.workers,
            trials_per_worker = trials,
            elapsed_us = elapsed.as_micros() as u64,
            "sampling run joined"
        );

        Ok(SamplingRun { results, elapsed })
    }

    /// Run with a caller-supplied coin factory
    ///
    /// `make_coin` is called once per worker, on that worker's thread, with the
    /// worker's seed. Used to inject deterministic coins.
    pub fn run_with<C, F>(
        &self,
        seeds: &[Seed],
        trials_per_worker: i64,
        make_coin: F,
    ) -> SamplerResult<Vec<PartialResult>>
    where
        C: Coin,
        F: Fn(Seed) -> C + Sync,
    {
        let trials = self.validate(seeds, trials_per_worker)?;
        let pool = self.build_pool(seeds.len())?;
        self.execute(seeds, trials, &make_coin, pool.as_ref())
    }

    /// Input checks, all before any thread is launched
    fn validate(&self, seeds: &[Seed], trials_per_worker: i64) -> SamplerResult<u64> {
        let trials = u64::try_from(trials_per_worker)
            .map_err(|_| SamplerError::InvalidTrialCount(trials_per_worker))?;

        if seeds.len() != self.workers {
            return Err(SamplerError::SeedCountMismatch {
                expected: self.workers,
                actual: seeds.len(),
            });
        }

        Ok(trials)
    }

    /// Dedicated pool for the `Pool` executor, one thread per worker
    fn build_pool(&self, workers: usize) -> SamplerResult<Option<rayon::ThreadPool>> {
        if workers == 0 || self.executor == Executor::Scoped {
            return Ok(None);
        }

        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("flip-worker-{}", i))
            .build()
            .map(Some)
            .map_err(|e| SamplerError::ExecutorUnavailable(e.to_string()))
    }

    fn execute<C, F>(
        &self,
        seeds: &[Seed],
        trials: u64,
        make_coin: &F,
        pool: Option<&rayon::ThreadPool>,
    ) -> SamplerResult<Vec<PartialResult>>
    where
        C: Coin,
        F: Fn(Seed) -> C + Sync,
    {
        if seeds.is_empty() {
            return Ok(Vec::new());
        }

        let cpus = num_cpus::get();
        if seeds.len() > cpus {
            tracing::debug!(workers = seeds.len(), cpus, "more workers than logical CPUs");
        }

        match pool {
            Some(pool) => run_pool(pool, seeds, trials, make_coin),
            None => run_scoped(seeds, trials, make_coin),
        }
    }
}

/// Build the coin selected in configuration
pub fn coin_for(classifier: Classifier, seed: Seed) -> Box<dyn Coin> {
    match classifier {
        Classifier::Bernoulli => Box::new(FairCoin::with_seed(seed)),
        Classifier::Parity => Box::new(ParityCoin::with_seed(seed)),
    }
}

/// Body of one worker thread: seed, flip, publish
fn sample_one<C, F>(id: usize, seed: Seed, trials: u64, make_coin: &F) -> PartialResult
where
    C: Coin,
    F: Fn(Seed) -> C,
{
    let mut worker = Worker::new(id, seed, make_coin(seed));
    worker.run(trials);
    worker.into_result()
}

fn run_scoped<C, F>(seeds: &[Seed], trials: u64, make_coin: &F) -> SamplerResult<Vec<PartialResult>>
where
    C: Coin,
    F: Fn(Seed) -> C + Sync,
{
    let joined = crossbeam::thread::scope(|s| {
        let handles: Vec<_> = seeds
            .iter()
            .enumerate()
            .map(|(id, &seed)| s.spawn(move |_| sample_one(id, seed, trials, make_coin)))
            .collect();

        // Join every handle before reporting, so no thread outlives the run
        handles
            .into_iter()
            .enumerate()
            .map(|(id, handle)| handle.join().map_err(|_| SamplerError::WorkerPanicked(id)))
            .collect::<Vec<_>>()
    })
    .map_err(|_| SamplerError::WorkerPanicked(0))?;

    joined.into_iter().collect()
}

fn run_pool<C, F>(
    pool: &rayon::ThreadPool,
    seeds: &[Seed],
    trials: u64,
    make_coin: &F,
) -> SamplerResult<Vec<PartialResult>>
where
    C: Coin,
    F: Fn(Seed) -> C + Sync,
{
    pool.install(|| {
        seeds
            .par_iter()
            .with_max_len(1)
            .enumerate()
            .map(|(id, &seed)| {
                panic::catch_unwind(AssertUnwindSafe(|| sample_one(id, seed, trials, make_coin)))
                    .map_err(|_| SamplerError::WorkerPanicked(id))
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Outcome;

    /// Alternates heads and tails, starting with heads
    struct Alternating {
        next: Outcome,
    }

    impl Coin for Alternating {
        fn flip(&mut self) -> Outcome {
            let current = self.next;
            self.next = match current {
                Outcome::Heads => Outcome::Tails,
                Outcome::Tails => Outcome::Heads,
            };
            current
        }
    }

    struct Exploding;

    impl Coin for Exploding {
        fn flip(&mut self) -> Outcome {
            panic!("coin exploded");
        }
    }

    #[test]
    fn test_run_returns_one_result_per_seed() {
        let sampler = ParallelSampler::new(4);
        let results = sampler.run(&[1, 2, 3, 4], 100).unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(results.iter().map(|r| r.total()).sum::<u64>(), 400);
        for (id, result) in results.iter().enumerate() {
            assert_eq!(result.worker_id(), id);
            assert_eq!(result.seed(), id as u64 + 1);
        }
    }

    #[test]
    fn test_run_seed_count_mismatch() {
        let sampler = ParallelSampler::new(4);
        assert_eq!(
            sampler.run(&[1, 2, 3], 10),
            Err(SamplerError::SeedCountMismatch { expected: 4, actual: 3 })
        );
    }

    #[test]
    fn test_run_negative_trials() {
        let sampler = ParallelSampler::new(2);
        assert_eq!(sampler.run(&[1, 2], -1), Err(SamplerError::InvalidTrialCount(-1)));
    }

    #[test]
    fn test_run_zero_trials() {
        let sampler = ParallelSampler::new(3);
        let results = sampler.run(&[1, 2, 3], 0).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.heads() == 0 && r.tails() == 0));
    }

    #[test]
    fn test_run_with_alternating_coin() {
        let sampler = ParallelSampler::new(2);
        let results = sampler
            .run_with(&[5, 6], 11, |_| Alternating { next: Outcome::Heads })
            .unwrap();

        for result in results {
            assert_eq!(result.heads(), 6);
            assert_eq!(result.tails(), 5);
        }
    }

    #[test]
    fn test_executors_agree() {
        let seeds = [11, 22, 33, 44, 55];
        let scoped = ParallelSampler::new(5).run(&seeds, 2048).unwrap();
        let pool = ParallelSampler::new(5)
            .with_executor(Executor::Pool)
            .run(&seeds, 2048)
            .unwrap();
        assert_eq!(scoped, pool);
    }

    #[test]
    fn test_classifiers_differ() {
        let seeds = [7, 8];
        let fair = ParallelSampler::new(2).run(&seeds, 4096).unwrap();
        let parity = ParallelSampler::new(2)
            .with_classifier(Classifier::Parity)
            .run(&seeds, 4096)
            .unwrap();
        assert_ne!(fair, parity);
    }

    #[test]
    fn test_scoped_worker_panic_fails_run() {
        let sampler = ParallelSampler::new(2);
        let result = sampler.run_with(&[1, 2], 10, |_| Exploding);
        assert!(matches!(result, Err(SamplerError::WorkerPanicked(_))));
    }

    #[test]
    fn test_pool_worker_panic_fails_run() {
        let sampler = ParallelSampler::new(2).with_executor(Executor::Pool);
        let result = sampler.run_with(&[1, 2], 10, |_| Exploding);
        assert!(matches!(result, Err(SamplerError::WorkerPanicked(_))));
    }

    #[test]
    fn test_run_timed() {
        let sampler = ParallelSampler::new(2);
        let run = sampler.run_timed(&[1, 2], 1000).unwrap();
        assert_eq!(run.results.len(), 2);
        assert!(run.elapsed > Duration::ZERO);
    }

    #[test]
    fn test_pool_built_before_launch() {
        let pool = ParallelSampler::new(3)
            .with_executor(Executor::Pool)
            .build_pool(3)
            .unwrap()
            .unwrap();
        assert_eq!(pool.current_num_threads(), 3);

        assert!(ParallelSampler::new(3).build_pool(3).unwrap().is_none());
        assert!(ParallelSampler::new(0)
            .with_executor(Executor::Pool)
            .build_pool(0)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_pool_run_timed() {
        let sampler = ParallelSampler::new(2).with_executor(Executor::Pool);
        let run = sampler.run_timed(&[1, 2], 1000).unwrap();
        assert_eq!(run.results.len(), 2);
        assert!(run.elapsed > Duration::ZERO);
    }

    #[test]
    fn test_zero_workers_empty() {
        let sampler = ParallelSampler::new(0);
        assert_eq!(sampler.run(&[], 10).unwrap(), Vec::new());
    }
}
