//! Human-readable text output
//!
//! The results table uses fixed 15-character right-aligned columns, one row per
//! batch. Everything here writes to a caller-supplied `io::Write` so the layout
//! can be tested; the CLI passes a locked stdout.

use crate::config::Config;
use crate::distribution::preview::StreamPreview;
use crate::seed::Seed;
use crate::stats::aggregator::FinalReport;
use std::io::{self, Write};

const COLUMNS: [&str; 6] = [
    "Trials/Worker",
    "numHeads",
    "numTails",
    "total",
    "Chi Squared",
    "Time (sec)",
];

/// Print the run banner and table header
pub fn print_header<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    writeln!(
        out,
        "Threaded simulation of {} coin flips per worker using the {} coin and {} workers.",
        config.sampler.trials_per_worker, config.sampler.classifier, config.sampler.workers
    )?;
    writeln!(out)?;

    for column in COLUMNS {
        write!(out, "{:>15}", column)?;
    }
    writeln!(out)
}

/// Print one batch row
pub fn print_row<W: Write>(out: &mut W, report: &FinalReport) -> io::Result<()> {
    writeln!(
        out,
        "{:>15}{:>15}{:>15}{:>15}{:>15.6}{:>15.6}",
        report.trials_per_worker(),
        report.heads(),
        report.tails(),
        report.total(),
        report.chi_square(),
        report.elapsed().as_secs_f64()
    )
}

/// Print each worker's tally, indented under the batch row
pub fn print_per_worker<W: Write>(out: &mut W, report: &FinalReport) -> io::Result<()> {
    for result in report.per_worker() {
        writeln!(
            out,
            "{:>15}{:>15}{:>15}{:>15}",
            format!("worker {}", result.worker_id()),
            result.heads(),
            result.tails(),
            result.total()
        )?;
    }
    Ok(())
}

/// Print the seed each worker received
pub fn print_seeds<W: Write>(out: &mut W, source: &str, seeds: &[Seed]) -> io::Result<()> {
    writeln!(out, "Seeds ({}):", source)?;
    for (rank, seed) in seeds.iter().enumerate() {
        writeln!(out, "  Worker {} has seed {}", rank, seed)?;
    }
    Ok(())
}

/// Print the opening values of one seeded stream
pub fn print_preview<W: Write>(out: &mut W, preview: &StreamPreview) -> io::Result<()> {
    writeln!(out, "--------------> seed: {}", preview.seed)?;

    writeln!(out, "Unsigned integer stream:")?;
    let ints: Vec<String> = preview.integers.iter().map(|v| v.to_string()).collect();
    writeln!(out, "{}", ints.join("  "))?;

    writeln!(out, "Real stream over [0.0, 1.0):")?;
    let reals: Vec<String> = preview.reals.iter().map(|v| format!("{:.6}", v)).collect();
    writeln!(out, "{}", reals.join("  "))
}

/// Print the closing verdict for the whole run
pub fn print_summary<W: Write>(out: &mut W, reports: &[&FinalReport]) -> io::Result<()> {
    let rejected = reports.iter().filter(|r| !r.is_consistent_with_fair_coin()).count();

    writeln!(out)?;
    if rejected == 0 {
        writeln!(out, "All {} batch(es) consistent with a fair coin at the 5% level.", reports.len())
    } else {
        writeln!(
            out,
            "{} of {} batch(es) reject the fair-coin hypothesis at the 5% level.",
            rejected,
            reports.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Outcome;
    use crate::stats::aggregator::Aggregator;
    use crate::stats::Tally;

    fn report(heads: u64, tails: u64) -> FinalReport {
        let mut tally = Tally::new();
        (0..heads).for_each(|_| tally.record(Outcome::Heads));
        (0..tails).for_each(|_| tally.record(Outcome::Tails));
        Aggregator::combine(vec![tally.publish(0, 9)]).unwrap()
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_columns() {
        let text = render(|out| print_header(out, &Config::default()));
        let header = text.lines().last().unwrap();

        assert_eq!(header.len(), 15 * COLUMNS.len());
        assert!(header.contains("Chi Squared"));
        assert!(text.contains("4 workers"));
    }

    #[test]
    fn test_row_layout() {
        let text = render(|out| print_row(out, &report(1, 0)));
        let row = text.trim_end_matches('\n');

        assert_eq!(row.len(), 15 * 6);
        assert_eq!(row[..15].trim(), "1");
        assert_eq!(row[60..75].trim(), "1.000000");
    }

    #[test]
    fn test_per_worker_rows() {
        let text = render(|out| print_per_worker(out, &report(3, 2)));
        assert!(text.contains("worker 0"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_seed_listing() {
        let text = render(|out| print_seeds(out, "os", &[10, 20]));
        assert!(text.contains("Worker 0 has seed 10"));
        assert!(text.contains("Worker 1 has seed 20"));
    }

    #[test]
    fn test_preview_output() {
        let preview = StreamPreview::generate(3, 4);
        let text = render(|out| print_preview(out, &preview));
        assert!(text.starts_with("--------------> seed: 3"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_summary_verdict() {
        let fair = report(50, 50);
        let biased = report(90, 10);

        let text = render(|out| print_summary(out, &[&fair]));
        assert!(text.contains("All 1 batch(es) consistent"));

        let text = render(|out| print_summary(out, &[&fair, &biased]));
        assert!(text.contains("1 of 2 batch(es) reject"));
    }
}
