//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{parse_count, parse_seed_list};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Build the effective configuration: defaults, then `--config` file, then CLI
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    merge_cli_with_config(cli, base)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Override sampler settings
    if let Some(trials) = &cli.trials {
        config.sampler.trials_per_worker = parse_count(trials)
            .context("Invalid trial count")?;
    }
    if let Some(workers) = cli.workers {
        config.sampler.workers = workers;
    }
    if let Some(max) = &cli.sweep_to {
        config.sampler.sweep_to = Some(parse_count(max).context("Invalid sweep bound")?);
    }
    if let Some(classifier) = cli.classifier {
        config.sampler.classifier = classifier;
    }
    if let Some(executor) = cli.executor {
        config.sampler.executor = executor;
    }

    // Override seeding; an explicit list selects the fixed source
    if let Some(seeds) = &cli.seeds {
        config.seeds.fixed = parse_seed_list(seeds).context("Invalid seed list")?;
        config.seeds.source = SeedSourceKind::Fixed;
    }
    if let Some(source) = cli.seed_source {
        config.seeds.source = source;
        // A file's fixed list is meaningless once the CLI picks another source
        if source != SeedSourceKind::Fixed {
            config.seeds.fixed.clear();
        }
    }

    // Override output (flags only switch things on)
    if let Some(path) = &cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if let Some(preview) = cli.preview {
        config.output.preview = preview;
    }
    config.output.show_seeds |= cli.show_seeds;
    config.output.per_worker |= cli.per_worker;

    config.runtime.dry_run |= cli.dry_run;
    config.runtime.debug |= cli.debug;

    Ok(config)
}
