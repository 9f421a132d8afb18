//! Randomness consumed by the annealer.

use rand::Rng;

/// Source of the random draws an annealing run needs.
///
/// Implemented for every [`rand::Rng`], so a seeded `StdRng` or any other
/// generator can be passed directly. Tests may implement it by hand to
/// script a run.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` is never zero.
    fn choose_index(&mut self, len: usize) -> usize;

    /// `k` distinct indices from `0..len`, uniformly without replacement.
    fn choose_distinct(&mut self, len: usize, k: usize) -> Vec<usize>;
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn choose_distinct(&mut self, len: usize, k: usize) -> Vec<usize> {
        rand::seq::index::sample(self, len, k).into_vec()
    }
}
