//! Fair coin backed by a Bernoulli distribution
//!
//! Draws come from xoshiro256++ and are classified by a Bernoulli(0.5)
//! distribution rather than by looking at a single raw output bit. This is the
//! default coin.
//!
//! # Example
//!
//! ```
//! use flipstat::distribution::{Coin, bernoulli::FairCoin};
//!
//! let mut a = FairCoin::with_seed(7);
//! let mut b = FairCoin::with_seed(7);
//! assert_eq!(a.flip(), b.flip());
//! ```

use super::{Coin, Outcome};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Success probability of the Bernoulli draw
const P_HEADS: f64 = 0.5;

/// Unbiased coin: `true` from the Bernoulli draw is heads
pub struct FairCoin {
    rng: Xoshiro256PlusPlus,
}

impl FairCoin {
    /// Create a coin whose stream is fully determined by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Coin for FairCoin {
    #[inline(always)]
    fn flip(&mut self) -> Outcome {
        // gen_bool compares a full 64-bit draw against p
        if self.rng.gen_bool(P_HEADS) {
            Outcome::Heads
        } else {
            Outcome::Tails
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fair_coin_seeded() {
        let mut coin1 = FairCoin::with_seed(12345);
        let mut coin2 = FairCoin::with_seed(12345);

        // Same seed should produce same sequence
        for _ in 0..64 {
            assert_eq!(coin1.flip(), coin2.flip());
        }
    }

    #[test]
    fn test_fair_coin_different_seeds_diverge() {
        let mut coin1 = FairCoin::with_seed(1);
        let mut coin2 = FairCoin::with_seed(2);

        let seq1: Vec<Outcome> = (0..64).map(|_| coin1.flip()).collect();
        let seq2: Vec<Outcome> = (0..64).map(|_| coin2.flip()).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fair_coin_balance() {
        let mut coin = FairCoin::with_seed(42);
        let flips = 100_000;
        let heads = (0..flips).filter(|_| coin.flip() == Outcome::Heads).count();

        // Within 2% of half
        assert!(heads > 48_000 && heads < 52_000, "heads = {}", heads);
    }
}
