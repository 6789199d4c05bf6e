//! flipstat CLI entry point

use anyhow::{Context, Result};
use flipstat::config::{cli::Cli, Config};
use flipstat::coordinator::LocalCoordinator;
use flipstat::distribution::preview::StreamPreview;
use flipstat::output::{json, text};
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;

    // Build configuration: defaults, then TOML file, then CLI overrides
    let config = flipstat::config::toml::load_config(&cli)?;

    init_tracing(config.runtime.debug);

    println!("flipstat v{}", env!("CARGO_PKG_VERSION"));
    println!("Parallel seeded coin-flip sampler");
    println!();

    flipstat::config::validator::validate_config(&config)
        .context("Configuration validation failed")?;

    println!("{}", config);

    if config.runtime.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    println!();
    run(Arc::new(config))
}

/// Logs go to stderr so stdout stays a clean table. RUST_LOG wins over --debug.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(config: Arc<Config>) -> Result<()> {
    let stdout = std::io::stdout();

    let mut coordinator = LocalCoordinator::new(config.clone());
    let source_name = coordinator.seed_source_name();
    let hostname = json::local_hostname();
    let mut records = Vec::new();

    text::print_header(&mut stdout.lock(), &config)?;

    let outcomes = coordinator.run(
        |_, seeds| {
            let mut out = stdout.lock();
            if config.output.show_seeds {
                text::print_seeds(&mut out, source_name, seeds)?;
            }
            if config.output.preview > 0 {
                for &seed in seeds {
                    text::print_preview(&mut out, &StreamPreview::generate(seed, config.output.preview))?;
                }
            }
            Ok(())
        },
        |outcome| {
            let mut out = stdout.lock();
            text::print_row(&mut out, &outcome.report)?;
            if config.output.per_worker {
                text::print_per_worker(&mut out, &outcome.report)?;
            }
            out.flush()?;

            if config.output.json_output.is_some() {
                records.push(json::build_batch_record(
                    outcome,
                    &config,
                    chrono::Utc::now(),
                    hostname.clone(),
                ));
            }
            Ok(())
        },
    )?;

    let reports: Vec<_> = outcomes.iter().map(|o| &o.report).collect();
    text::print_summary(&mut stdout.lock(), &reports)?;

    if let Some(path) = &config.output.json_output {
        json::write_json_output(path, &records, true)?;
        tracing::info!(path = %path.display(), records = records.len(), "wrote JSON output");
    }

    Ok(())
}
