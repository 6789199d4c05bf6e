//! CLI argument parsing using clap

use super::sampling::{Classifier, Executor, SeedSourceKind};
use clap::Parser;
use std::path::PathBuf;

/// flipstat - Parallel seeded coin-flip sampler with a chi-square self-check
#[derive(Parser, Debug)]
#[command(name = "flipstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Trials per worker (e.g., 256, 4k, 1M) [default: 256]
    #[arg(value_name = "TRIALS", allow_negative_numbers = true)]
    pub trials: Option<String>,

    /// Number of workers (one thread and one seed each) [default: 4]
    #[arg(short = 't', long)]
    pub workers: Option<usize>,

    /// Double the trials after each batch until this count is exceeded (e.g., 1G)
    #[arg(long, value_name = "MAX")]
    pub sweep_to: Option<String>,

    // === Seeding Options ===
    /// Seed source; clock sources are weak and must be chosen explicitly
    #[arg(long, value_enum)]
    pub seed_source: Option<SeedSourceKind>,

    /// Comma-separated seeds, one per worker (implies --seed-source fixed)
    #[arg(long, value_name = "S1,S2,...")]
    pub seeds: Option<String>,

    // === Sampling Options ===
    /// Rule for turning draws into heads or tails
    #[arg(long, value_enum)]
    pub classifier: Option<Classifier>,

    /// Thread primitive for the worker pool
    #[arg(long, value_enum)]
    pub executor: Option<Executor>,

    // === Output Options ===
    /// Print the seed allocated to each worker
    #[arg(long)]
    pub show_seeds: bool,

    /// Print each worker's tally under the summary row
    #[arg(long)]
    pub per_worker: bool,

    /// Print the first N integers and reals of each worker's stream
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// JSON record output file path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    // === Configuration File ===
    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Dry run - validate configuration without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments that don't depend on the config file
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == Some(0) {
            anyhow::bail!("workers must be at least 1");
        }

        if self.seeds.is_some() {
            if let Some(source) = self.seed_source {
                if source != SeedSourceKind::Fixed {
                    anyhow::bail!("--seeds cannot be combined with --seed-source {}", source);
                }
            }
        }

        Ok(())
    }
}
