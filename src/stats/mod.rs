//! Flip statistics
//!
//! Per-worker tallies and the immutable partial results workers publish.
//!
//! A `Tally` is plain (non-atomic) counters owned by exactly one worker. Workers
//! never touch each other's tallies; merging happens once, after the join, in
//! the [`aggregator`].
//!
//! # Example
//!
//! ```
//! use flipstat::stats::Tally;
//! use flipstat::distribution::Outcome;
//!
//! let mut tally = Tally::new();
//! tally.record(Outcome::Heads);
//! tally.record(Outcome::Tails);
//! tally.record(Outcome::Heads);
//!
//! assert_eq!(tally.heads(), 2);
//! assert_eq!(tally.tails(), 1);
//! assert_eq!(tally.total(), 3);
//! ```

pub mod aggregator;

use crate::distribution::Outcome;
use crate::seed::Seed;
use serde::{Deserialize, Serialize};

/// Heads/tails counters for one worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    heads: u64,
    tails: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Heads => self.heads += 1,
            Outcome::Tails => self.tails += 1,
        }
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

    /// Freeze the tally into the result a worker publishes
    pub fn publish(self, worker_id: usize, seed: Seed) -> PartialResult {
        PartialResult {
            worker_id,
            seed,
            heads: self.heads,
            tails: self.tails,
        }
    }
}

/// Snapshot of one worker's tally, published once after its loop completes
///
/// Fields are private; a published result cannot be modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialResult {
    worker_id: usize,
    seed: Seed,
    heads: u64,
    tails: u64,
}

impl PartialResult {
    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    pub fn seed(&self) -> Seed {
        self.seed
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_new() {
        let tally = Tally::new();
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn test_tally_record() {
        let mut tally = Tally::new();
        for _ in 0..3 {
            tally.record(Outcome::Heads);
        }
        tally.record(Outcome::Tails);

        assert_eq!(tally.heads(), 3);
        assert_eq!(tally.tails(), 1);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_publish() {
        let mut tally = Tally::new();
        tally.record(Outcome::Tails);

        let result = tally.publish(3, 0xDEAD_BEEF);
        assert_eq!(result.worker_id(), 3);
        assert_eq!(result.seed(), 0xDEAD_BEEF);
        assert_eq!(result.heads(), 0);
        assert_eq!(result.tails(), 1);
        assert_eq!(result.total(), 1);
    }
}
