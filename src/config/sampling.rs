//! Sampling configuration types

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule that turns generator draws into heads or tails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Classifier {
    /// Bernoulli(0.5) draw from xoshiro256++
    #[default]
    Bernoulli,
    /// Low bit of a raw xoshiro256++ u32 (even is heads)
    Parity,
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Classifier::Bernoulli => write!(f, "bernoulli"),
            Classifier::Parity => write!(f, "parity"),
        }
    }
}

/// Thread primitive used for the fixed worker pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Executor {
    /// One scoped thread per worker
    #[default]
    Scoped,
    /// Dedicated thread pool sized to the worker count
    Pool,
}

impl fmt::Display for Executor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Executor::Scoped => write!(f, "scoped"),
            Executor::Pool => write!(f, "pool"),
        }
    }
}

/// Where worker seeds come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeedSourceKind {
    /// Operating system entropy
    #[default]
    Os,
    /// Wall-clock seconds (weak: collides in a tight loop)
    Clock,
    /// Wall-clock seconds tagged with the worker rank (weak)
    ClockRank,
    /// Explicit list of seeds
    Fixed,
}

impl SeedSourceKind {
    /// Whether this source is predictable or collision-prone
    pub fn is_weak(&self) -> bool {
        matches!(self, SeedSourceKind::Clock | SeedSourceKind::ClockRank)
    }
}

impl fmt::Display for SeedSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeedSourceKind::Os => write!(f, "os"),
            SeedSourceKind::Clock => write!(f, "clock"),
            SeedSourceKind::ClockRank => write!(f, "clock-rank"),
            SeedSourceKind::Fixed => write!(f, "fixed"),
        }
    }
}
