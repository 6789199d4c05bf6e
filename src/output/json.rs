//! JSON output formatting
//!
//! One record per batch, written as a pretty-printed array. Each record carries
//! the run configuration, totals, the chi-square verdict, elapsed time, and
//! optionally every worker's seed and tally.

use crate::config::Config;
use crate::coordinator::BatchOutcome;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        let micros = d.as_micros() as u64;
        let human = format_duration_human(d);
        Self { micros, human }
    }
}

/// Run settings shared by every batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRunInfo {
    pub classifier: String,
    pub executor: String,
    pub seed_source: String,
    pub weak_seeds: bool,
}

/// One worker's published tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonWorker {
    pub worker_id: usize,
    pub seed: u64,
    pub heads: u64,
    pub tails: u64,
}

/// One batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonBatchRecord {
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub batch: usize,
    pub run: JsonRunInfo,
    pub workers: usize,
    pub trials_per_worker: u64,
    pub heads: u64,
    pub tails: u64,
    pub total: u64,
    pub chi_square: f64,
    pub fair_at_95: bool,
    pub elapsed: JsonDuration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_worker: Option<Vec<JsonWorker>>,
}

/// Build the record for one finished batch
pub fn build_batch_record(
    outcome: &BatchOutcome,
    config: &Config,
    timestamp: DateTime<Utc>,
    hostname: Option<String>,
) -> JsonBatchRecord {
    let report = &outcome.report;

    let per_worker = config.output.per_worker.then(|| {
        report
            .per_worker()
            .iter()
            .map(|r| JsonWorker {
                worker_id: r.worker_id(),
                seed: r.seed(),
                heads: r.heads(),
                tails: r.tails(),
            })
            .collect()
    });

    JsonBatchRecord {
        timestamp: timestamp.to_rfc3339(),
        hostname,
        batch: outcome.index,
        run: JsonRunInfo {
            classifier: config.sampler.classifier.to_string(),
            executor: config.sampler.executor.to_string(),
            seed_source: config.seeds.source.to_string(),
            weak_seeds: config.seeds.source.is_weak(),
        },
        workers: report.workers(),
        trials_per_worker: report.trials_per_worker(),
        heads: report.heads(),
        tails: report.tails(),
        total: report.total(),
        chi_square: report.chi_square(),
        fair_at_95: report.is_consistent_with_fair_coin(),
        elapsed: JsonDuration::from_duration(report.elapsed()),
        per_worker,
    }
}

/// Host name for record provenance, if the OS reports one
pub fn local_hostname() -> Option<String> {
    hostname::get().ok().map(|h| h.to_string_lossy().into_owned())
}

/// Write batch records to a JSON file
pub fn write_json_output(output_path: &Path, records: &[JsonBatchRecord], pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;

    if pretty {
        serde_json::to_writer_pretty(file, records)?;
    } else {
        serde_json::to_writer(file, records)?;
    }

    Ok(())
}

/// Format duration in human-readable format
fn format_duration_human(d: Duration) -> String {
    let micros = d.as_micros() as u64;

    if micros == 0 {
        return "0µs".to_string();
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.3}ms", micros as f64 / 1000.0)
    } else if micros < 60_000_000 {
        format!("{:.3}s", micros as f64 / 1_000_000.0)
    } else {
        format!("{:.2}m", micros as f64 / 60_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Outcome;
    use crate::stats::aggregator::Aggregator;
    use crate::stats::Tally;

    fn outcome() -> BatchOutcome {
        let mut a = Tally::new();
        a.record(Outcome::Heads);
        a.record(Outcome::Heads);
        let mut b = Tally::new();
        b.record(Outcome::Tails);
        b.record(Outcome::Heads);

        let report = Aggregator::combine(vec![a.publish(0, 100), b.publish(1, 200)]).unwrap();
        BatchOutcome { index: 2, seeds: vec![100, 200], report }
    }

    #[test]
    fn test_format_duration_human() {
        assert_eq!(format_duration_human(Duration::ZERO), "0µs");
        assert_eq!(format_duration_human(Duration::from_micros(250)), "250µs");
        assert_eq!(format_duration_human(Duration::from_micros(1500)), "1.500ms");
        assert_eq!(format_duration_human(Duration::from_secs(2)), "2.000s");
        assert_eq!(format_duration_human(Duration::from_secs(120)), "2.00m");
    }

    #[test]
    fn test_build_batch_record() {
        let config = Config::default();
        let record = build_batch_record(&outcome(), &config, Utc::now(), Some("node-a".to_string()));

        assert_eq!(record.batch, 2);
        assert_eq!(record.workers, 2);
        assert_eq!(record.trials_per_worker, 2);
        assert_eq!(record.heads, 3);
        assert_eq!(record.tails, 1);
        assert_eq!(record.total, 4);
        assert_eq!(record.run.seed_source, "os");
        assert!(!record.run.weak_seeds);
        assert!(record.per_worker.is_none());
    }

    #[test]
    fn test_build_batch_record_per_worker() {
        let mut config = Config::default();
        config.output.per_worker = true;
        let record = build_batch_record(&outcome(), &config, Utc::now(), None);

        let workers = record.per_worker.unwrap();
        assert_eq!(workers.len(), 2);
        assert_eq!(workers[1].seed, 200);
        assert_eq!(workers[1].tails, 1);
    }

    #[test]
    fn test_write_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.json");

        let record = build_batch_record(&outcome(), &Config::default(), Utc::now(), None);
        write_json_output(&path, &[record.clone()], true).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<JsonBatchRecord> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, vec![record]);
        assert!(!contents.contains("hostname"));
    }
}
