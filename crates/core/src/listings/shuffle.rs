//! Randomness used to order non-featured listings.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of uniformly distributed indices for shuffling.
pub trait ShuffleSource: Send + Sync {
    /// Returns an index in `0..=upper`.
    fn pick(&self, upper: usize) -> usize;
}

/// Non-reproducible source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngShuffle;

impl ShuffleSource for ThreadRngShuffle {
    fn pick(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..=upper)
    }
}

/// Reproducible source for tests and previews.
pub struct SeededShuffle {
    rng: Mutex<StdRng>,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ShuffleSource for SeededShuffle {
    fn pick(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..=upper)
    }
}

/// In-place Fisher–Yates shuffle.
pub fn fisher_yates<T>(items: &mut [T], source: &dyn ShuffleSource) {
    for i in (1..items.len()).rev() {
        let j = source.pick(i);
        items.swap(i, j);
    }
}
