//! Worker implementation
//!
//! A worker is the unit of parallel execution: it owns one coin seeded from its
//! assigned seed and one tally, flips the coin a fixed number of times, and
//! publishes the tally once.
//!
//! # Lifecycle
//!
//! 1. **Creation**: `Worker::new()` inside the worker's own thread
//! 2. **Execution**: `run()` performs the flip loop
//! 3. **Completion**: `into_result()` consumes the worker and publishes its tally
//!
//! # Example
//!
//! ```
//! use flipstat::distribution::bernoulli::FairCoin;
//! use flipstat::worker::Worker;
//!
//! let mut worker = Worker::new(0, 42, FairCoin::with_seed(42));
//! worker.run(1000);
//! let result = worker.into_result();
//! assert_eq!(result.total(), 1000);
//! ```

use crate::distribution::Coin;
use crate::seed::Seed;
use crate::stats::{PartialResult, Tally};

/// One worker's private state for a sampling run
///
/// Nothing in a worker is shared; it is moved into (or created on) the thread
/// that runs it and consumed when its result is published.
pub struct Worker<C> {
    /// Worker rank within the run
    id: usize,

    /// Seed the coin was built from (reported, never reused)
    seed: Seed,

    coin: C,

    tally: Tally,
}

impl<C: Coin> Worker<C> {
    /// Create a worker around an already-seeded coin
    pub fn new(id: usize, seed: Seed, coin: C) -> Self {
        Self {
            id,
            seed,
            coin,
            tally: Tally::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Flip the coin `trials` times, recording each outcome
    pub fn run(&mut self, trials: u64) {
        for _ in 0..trials {
            let outcome = self.coin.flip();
            self.tally.record(outcome);
        }
    }

    /// Consume the worker and publish its tally
    pub fn into_result(self) -> PartialResult {
        self.tally.publish(self.id, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::bernoulli::FairCoin;
    use crate::distribution::Outcome;

    struct AlwaysTails;

    impl Coin for AlwaysTails {
        fn flip(&mut self) -> Outcome {
            Outcome::Tails
        }
    }

    #[test]
    fn test_worker_run_counts() {
        let mut worker = Worker::new(2, 7, AlwaysTails);
        worker.run(10);
        let result = worker.into_result();

        assert_eq!(result.worker_id(), 2);
        assert_eq!(result.seed(), 7);
        assert_eq!(result.heads(), 0);
        assert_eq!(result.tails(), 10);
    }

    #[test]
    fn test_worker_zero_trials() {
        let mut worker = Worker::new(0, 1, FairCoin::with_seed(1));
        worker.run(0);
        let result = worker.into_result();
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_worker_reproducible() {
        let run = |seed| {
            let mut worker = Worker::new(0, seed, FairCoin::with_seed(seed));
            worker.run(5000);
            worker.into_result()
        };
        assert_eq!(run(31), run(31));
    }
}
