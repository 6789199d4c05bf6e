//! Parity coin
//!
//! Classifies a raw `u32` draw by its lowest bit: even is heads, odd is tails.
//! Only as good as the low bit of the underlying generator; kept as an
//! explicit choice for comparing against [`FairCoin`](super::bernoulli::FairCoin).

use super::{Coin, Outcome};
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Coin that looks only at the low bit of each draw
pub struct ParityCoin {
    rng: Xoshiro256PlusPlus,
}

impl ParityCoin {
    /// Create a parity coin from a seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Coin for ParityCoin {
    #[inline(always)]
    fn flip(&mut self) -> Outcome {
        if self.rng.next_u32() & 1 == 0 {
            Outcome::Heads
        } else {
            Outcome::Tails
        }
    }
}
