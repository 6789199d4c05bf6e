//! flipstat - Parallel seeded coin-flip sampler
//!
//! flipstat runs a fixed pool of workers, each flipping a private pseudo-random
//! coin seeded from operating system entropy, and checks the combined counts
//! against a fair coin with a chi-square test.
//!
//! # Architecture
//!
//! - **Seed allocation**: one high-entropy seed per worker, drawn before launch
//! - **Parallel sampling**: fork once, join once; no shared generator state
//! - **Aggregation**: order-independent reduction with a goodness-of-fit check
//! - **Batches**: single runs or doubling sweeps of the trial count

pub mod config;
pub mod coordinator;
pub mod distribution;
pub mod error;
pub mod output;
pub mod sampler;
pub mod seed;
pub mod stats;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use error::SamplerError;
pub use sampler::ParallelSampler;

/// Result type used throughout flipstat
pub type Result<T> = anyhow::Result<T>;
