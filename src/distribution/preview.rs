//! Stream previews
//!
//! Shows the first few values of the stream a seed produces, as unsigned
//! integers and as reals in [0.0, 1.0). Both come from the same xoshiro256++
//! generator the coins use, one after the other, so a preview is a direct view
//! of what a worker with that seed would consume.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// First values drawn from one seeded stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamPreview {
    pub seed: u64,
    pub integers: Vec<u32>,
    pub reals: Vec<f64>,
}

impl StreamPreview {
    /// Draw `len` integers, then `len` reals, from a generator seeded with `seed`
    pub fn generate(seed: u64, len: usize) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let integers = (0..len).map(|_| rng.gen::<u32>()).collect();
        let reals = (0..len).map(|_| rng.gen::<f64>()).collect();

        Self { seed, integers, reals }
    }
}
