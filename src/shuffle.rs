//! Unbiased shuffling over an injected randomness source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random integers.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` is never zero.
    fn below(&mut self, bound: usize) -> usize;
}

/// Adapts any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn below(&mut self, bound: usize) -> usize {
        self.0.random_range(0..bound)
    }
}

pub type SeededSource = RngSource<ChaCha8Rng>;

impl SeededSource {
    /// Deterministic stream: same seed, same cards.
    pub fn seeded(seed: u64) -> Self {
        RngSource(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        RngSource(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

/// Fisher–Yates: returns a new uniformly random permutation of `items`.
pub fn shuffled<T: Clone, S: RandomSource + ?Sized>(items: &[T], source: &mut S) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = source.below(i + 1);
        out.swap(i, j);
    }
    out
}
