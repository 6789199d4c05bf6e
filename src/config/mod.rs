//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! Precedence: built-in defaults, then the TOML file, then CLI flags.

pub mod cli;
pub mod cli_convert;
pub mod sampling;
pub mod toml;
pub mod validator;

use crate::seed::Seed;
use sampling::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub seeds: SeedConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Sampler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of workers (one seed and one thread each)
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Flips per worker; signed so negative input reaches validation
    #[serde(default = "default_trials_per_worker")]
    pub trials_per_worker: i64,
    /// Double trials per worker after each batch until this value is exceeded
    pub sweep_to: Option<i64>,
    /// Coin classification rule
    #[serde(default)]
    pub classifier: Classifier,
    /// Thread primitive for the worker pool
    #[serde(default)]
    pub executor: Executor,
}

fn default_workers() -> usize {
    4
}

fn default_trials_per_worker() -> i64 {
    256
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            trials_per_worker: default_trials_per_worker(),
            sweep_to: None,
            classifier: Classifier::default(),
            executor: Executor::default(),
        }
    }
}

impl SamplerConfig {
    /// Trials per worker for each batch, in run order
    ///
    /// A single batch unless `sweep_to` is set, in which case the count doubles
    /// while it stays at or below `sweep_to`. A zero start cannot double, so it
    /// yields one batch.
    pub fn batch_schedule(&self) -> Vec<i64> {
        let start = self.trials_per_worker;
        let Some(max) = self.sweep_to else {
            return vec![start];
        };

        if start <= 0 {
            return vec![start];
        }

        let mut schedule = Vec::new();
        let mut trials = start;
        while trials <= max {
            schedule.push(trials);
            match trials.checked_mul(2) {
                Some(next) => trials = next,
                None => break,
            }
        }
        schedule
    }
}

/// Seed source configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed source
    #[serde(default)]
    pub source: SeedSourceKind,
    /// Seeds for the `fixed` source, one per worker
    #[serde(default)]
    pub fixed: Vec<Seed>,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON record file path
    pub json_output: Option<PathBuf>,
    /// Print the seed allocated to each worker
    #[serde(default)]
    pub show_seeds: bool,
    /// Print each worker's tally under the summary row
    #[serde(default)]
    pub per_worker: bool,
    /// Print this many values from each worker's stream before sampling
    #[serde(default)]
    pub preview: usize,
}

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Dry run mode
    #[serde(default)]
    pub dry_run: bool,
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Workers:           {}", self.sampler.workers)?;
        writeln!(f, "Trials per worker: {}", self.sampler.trials_per_worker)?;
        if let Some(max) = self.sampler.sweep_to {
            writeln!(f, "Sweep to:          {}", max)?;
        }
        writeln!(f, "Classifier:        {}", self.sampler.classifier)?;
        writeln!(f, "Executor:          {}", self.sampler.executor)?;
        write!(f, "Seed source:       {}", self.seeds.source)?;
        if self.seeds.source.is_weak() {
            write!(f, " (weak)")?;
        }
        Ok(())
    }
}
