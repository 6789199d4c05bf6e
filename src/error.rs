//! Error taxonomy for the sampling core
//!
//! The seed allocator, sampler and aggregator return `SamplerError` so callers
//! can tell input validation failures apart from entropy or worker failures.
//! Every variant is fatal for the run that produced it; there is no retry path.
//!
//! The application layer (configuration, coordinator, output) wraps these in
//! `anyhow::Error` with added context.

use thiserror::Error;

/// Sampling core error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    /// The seed source could not produce a value.
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// Seed allocation requested for zero workers.
    #[error("Worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    /// Negative trials-per-worker.
    #[error("Trials per worker must be non-negative, got {0}")]
    InvalidTrialCount(i64),

    /// Seed list length differs from the worker count.
    #[error("Expected {expected} seeds (one per worker), got {actual}")]
    SeedCountMismatch { expected: usize, actual: usize },

    /// Aggregation over zero partial results.
    #[error("Cannot combine an empty result set")]
    EmptyResultSet,

    /// Two partial results claim the same worker id.
    #[error("Worker {0} published more than one partial result")]
    DuplicateWorker(usize),

    /// A worker thread panicked before publishing its tally.
    #[error("Worker {0} panicked during sampling")]
    WorkerPanicked(usize),

    /// The thread pool executor could not be created.
    #[error("Executor unavailable: {0}")]
    ExecutorUnavailable(String),
}

/// Result type for the sampling core
pub type SamplerResult<T> = std::result::Result<T, SamplerError>;
