//! Seeded pseudo-random stream
//!
//! Every random decision in texture generation is drawn from a `SeededRandom`,
//! so a single integer seed fully determines the output.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic generator of floats in [0, 1)
///
/// Two generators built from the same seed yield identical, infinite
/// sequences. No external entropy is involved.
///
/// # Example
///
/// ```rust
/// use planet_texture::SeededRandom;
///
/// let a: Vec<f64> = SeededRandom::new(42).take(4).collect();
/// let b: Vec<f64> = SeededRandom::new(42).take(4).collect();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
        }
    }

    /// Next value in [0, 1)
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform index in `0..bound`, derived from `next_f64`
    ///
    /// `bound` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, bound: usize) -> usize {
        let idx = (self.next_f64() * bound as f64) as usize;
        // Guards the float rounding edge at the top of the range
        idx.min(bound - 1)
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
