//! Configuration validation
//!
//! Catches bad input before any seed is drawn or thread launched. A negative
//! trial count is deliberately left for the sampler to reject with
//! `InvalidTrialCount`, so the error the user sees names the sampling contract.

use super::*;
use anyhow::Result;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_sampler(&config.sampler)?;
    validate_seeds(&config.seeds, config.sampler.workers)?;

    Ok(())
}

/// Validate sampler configuration
pub fn validate_sampler(sampler: &SamplerConfig) -> Result<()> {
    if sampler.workers == 0 {
        anyhow::bail!("workers must be at least 1");
    }

    if let Some(max) = sampler.sweep_to {
        if max < sampler.trials_per_worker {
            anyhow::bail!(
                "sweep_to ({}) must be at least trials_per_worker ({})",
                max,
                sampler.trials_per_worker
            );
        }
    }

    Ok(())
}

/// Validate seed configuration against the worker count
pub fn validate_seeds(seeds: &SeedConfig, workers: usize) -> Result<()> {
    match seeds.source {
        SeedSourceKind::Fixed => {
            if seeds.fixed.len() != workers {
                anyhow::bail!(
                    "fixed seed source needs one seed per worker: {} workers, {} seeds",
                    workers,
                    seeds.fixed.len()
                );
            }
        }
        _ => {
            if !seeds.fixed.is_empty() {
                anyhow::bail!("fixed seeds given but seed source is {}", seeds.source);
            }
        }
    }

    Ok(())
}
