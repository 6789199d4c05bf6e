//! Two-outcome coin implementations
//!
//! A coin pairs a seeded pseudo-random generator with a classification rule
//! that turns each draw into heads or tails. Every worker owns exactly one coin
//! for the lifetime of a sampling run; coins are never shared between threads.
//!
//! # Coins
//!
//! - **FairCoin**: xoshiro256++ sampled through a Bernoulli(0.5) distribution (default)
//! - **ParityCoin**: parity of a raw xoshiro256++ `u32` draw (even is heads)
//!
//! # Example
//!
//! ```
//! use flipstat::distribution::{Coin, Outcome, bernoulli::FairCoin};
//!
//! let mut coin = FairCoin::with_seed(42);
//! let mut heads = 0;
//! for _ in 0..100 {
//!     if coin.flip() == Outcome::Heads {
//!         heads += 1;
//!     }
//! }
//! assert!(heads <= 100);
//! ```

use serde::{Deserialize, Serialize};

/// Result of a single flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Heads,
    Tails,
}

/// Coin trait for two-outcome sampling
///
/// The classification rule must be deterministic given the generator's draw,
/// so two coins built from the same seed produce the same outcome sequence.
///
/// # Thread Safety
///
/// Coins must be `Send` so a worker thread can take ownership of the coin it
/// was built for. They are not required to be `Sync`.
pub trait Coin: Send {
    /// Flip the coin once, advancing the generator
    fn flip(&mut self) -> Outcome;
}

impl Coin for Box<dyn Coin> {
    #[inline(always)]
    fn flip(&mut self) -> Outcome {
        (**self).flip()
    }
}

pub mod bernoulli;
pub mod parity;
pub mod preview;
