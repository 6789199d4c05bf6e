//! CLI to Config conversion utilities

use crate::seed::Seed;
use anyhow::{Context, Result};

/// Parse a count string (e.g., "256", "4k", "1M", "1G") with binary multipliers
///
/// Negative values are accepted so that the sampler can reject them with its
/// own error.
pub fn parse_count(s: &str) -> Result<i64> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('k') {
        (n, 1024i64)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('g') {
        (n, 1024 * 1024 * 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: i64 = num_str.trim().parse()
        .with_context(|| format!("Invalid count format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Count out of range: {}", s))
}

/// Parse a comma-separated seed list (decimal or 0x-prefixed hex)
pub fn parse_seed_list(s: &str) -> Result<Vec<Seed>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let parsed = match part.strip_prefix("0x").or_else(|| part.strip_prefix("0X")) {
                Some(hex) => Seed::from_str_radix(hex, 16),
                None => part.parse::<Seed>(),
            };
            parsed.with_context(|| format!("Invalid seed: {}", part))
        })
        .collect()
}
