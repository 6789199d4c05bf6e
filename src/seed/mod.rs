//! Seed allocation
//!
//! Produces one seed per worker, sequentially, strictly before any worker is
//! launched. The default source is the operating system entropy pool; a run
//! never falls back from it to a weaker source.
//!
//! # Sources
//!
//! - **OsEntropy**: `OsRng` (getrandom), fails with `EntropyUnavailable`
//! - **ClockSeeds**: wall-clock seconds, optionally tagged with the worker rank.
//!   Collides when called in a tight loop; only used when selected explicitly
//! - **FixedSeeds**: caller-supplied list for reproducible runs
//!
//! # Example
//!
//! ```
//! use flipstat::seed::{OsEntropy, SeedAllocator};
//!
//! let mut allocator = SeedAllocator::new(OsEntropy);
//! let seeds = allocator.allocate(4)?;
//! assert_eq!(seeds.len(), 4);
//! # Ok::<(), flipstat::error::SamplerError>(())
//! ```

use crate::config::sampling::SeedSourceKind;
use crate::error::{SamplerError, SamplerResult};
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Initial state for one worker's generator
pub type Seed = u64;

/// Source of per-worker seeds
pub trait SeedSource {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Draw the seed for worker `rank`
    fn next_seed(&mut self, rank: usize) -> SamplerResult<Seed>;

    /// Whether consecutive draws are predictable or likely to collide
    fn is_weak(&self) -> bool {
        false
    }

    /// Exact number of seeds this source can provide, if bounded
    fn capacity(&self) -> Option<usize> {
        None
    }
}

impl SeedSource for Box<dyn SeedSource> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn next_seed(&mut self, rank: usize) -> SamplerResult<Seed> {
        (**self).next_seed(rank)
    }

    fn is_weak(&self) -> bool {
        (**self).is_weak()
    }

    fn capacity(&self) -> Option<usize> {
        (**self).capacity()
    }
}

/// Operating system entropy
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl SeedSource for OsEntropy {
    fn name(&self) -> &'static str {
        "os"
    }

    fn next_seed(&mut self, _rank: usize) -> SamplerResult<Seed> {
        let mut buf = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| SamplerError::EntropyUnavailable(e.to_string()))?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// Wall-clock seconds as a seed
///
/// Without rank tagging every worker seeded within the same second gets the
/// same value. With rank tagging the low four bits are replaced by `rank + 1`
/// modulo 16, so seeds within one run are distinct for up to 16 workers and
/// repeat every 16 ranks after that. They stay predictable and
/// equal across runs started in the same second.
#[derive(Debug, Clone, Copy)]
pub struct ClockSeeds {
    rank_tagged: bool,
}

impl ClockSeeds {
    /// Plain seconds since the epoch
    pub fn plain() -> Self {
        Self { rank_tagged: false }
    }

    /// Seconds since the epoch with the worker rank in the low bits
    pub fn rank_tagged() -> Self {
        Self { rank_tagged: true }
    }
}

impl SeedSource for ClockSeeds {
    fn name(&self) -> &'static str {
        if self.rank_tagged {
            "clock-rank"
        } else {
            "clock"
        }
    }

    fn next_seed(&mut self, rank: usize) -> SamplerResult<Seed> {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| SamplerError::EntropyUnavailable(format!("system clock: {}", e)))?
            .as_secs();

        // Truncated to 32 bits, as an unsigned time_t cast would be
        let secs = secs & 0xFFFF_FFFF;

        if self.rank_tagged {
            Ok((secs & 0xFFFF_FFF0) | ((rank as u64 + 1) & 0xF))
        } else {
            Ok(secs)
        }
    }

    fn is_weak(&self) -> bool {
        true
    }
}

/// Replays a fixed list of seeds, one per rank
#[derive(Debug, Clone)]
pub struct FixedSeeds {
    seeds: Vec<Seed>,
}

impl FixedSeeds {
    pub fn new(seeds: Vec<Seed>) -> Self {
        Self { seeds }
    }
}

impl SeedSource for FixedSeeds {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn next_seed(&mut self, rank: usize) -> SamplerResult<Seed> {
        self.seeds
            .get(rank)
            .copied()
            .ok_or(SamplerError::SeedCountMismatch {
                expected: rank + 1,
                actual: self.seeds.len(),
            })
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.seeds.len())
    }
}

/// Build the seed source selected in configuration
pub fn source_for(kind: SeedSourceKind, fixed: &[Seed]) -> Box<dyn SeedSource> {
    match kind {
        SeedSourceKind::Os => Box::new(OsEntropy),
        SeedSourceKind::Clock => Box::new(ClockSeeds::plain()),
        SeedSourceKind::ClockRank => Box::new(ClockSeeds::rank_tagged()),
        SeedSourceKind::Fixed => Box::new(FixedSeeds::new(fixed.to_vec())),
    }
}

/// Allocates one seed per worker from a single source
pub struct SeedAllocator<S> {
    source: S,
}

impl<S: SeedSource> SeedAllocator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Name of the underlying source
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Draw `n` seeds, one per worker rank, in rank order
    ///
    /// # Errors
    ///
    /// - `InvalidWorkerCount` if `n == 0`
    /// - `SeedCountMismatch` if the source is bounded and cannot supply exactly `n`
    /// - `EntropyUnavailable` if the source fails
    pub fn allocate(&mut self, n: usize) -> SamplerResult<Vec<Seed>> {
        if n == 0 {
            return Err(SamplerError::InvalidWorkerCount(n));
        }

        if let Some(capacity) = self.source.capacity() {
            if capacity != n {
                return Err(SamplerError::SeedCountMismatch {
                    expected: n,
                    actual: capacity,
                });
            }
        }

        if self.source.is_weak() {
            tracing::warn!(
                source = self.source.name(),
                "using a weak seed source; worker streams may be correlated"
            );
        }

        let seeds = (0..n)
            .map(|rank| self.source.next_seed(rank))
            .collect::<SamplerResult<Vec<Seed>>>()?;

        let duplicates = duplicate_count(&seeds);
        if duplicates > 0 {
            tracing::warn!(
                source = self.source.name(),
                duplicates,
                "seed allocation produced duplicate seeds"
            );
        }

        tracing::debug!(source = self.source.name(), ?seeds, "allocated seeds");
        Ok(seeds)
    }
}

/// Number of seeds that repeat an earlier seed in the slice
pub fn duplicate_count(seeds: &[Seed]) -> usize {
    let unique: HashSet<&Seed> = seeds.iter().collect();
    seeds.len() - unique.len()
}
