use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Source of uniform randomness for shuffles and die rolls.
///
/// Everything random in the engine goes through this trait so tests and
/// replays can inject a seeded or scripted source.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
    fn next_in_range(&mut self, low: u32, high: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        (**self).next_in_range(low, high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        (**self).next_in_range(low, high)
    }
}

/// Default source backed by ChaCha20, reproducible when seeded.
///
/// # Examples
///
/// ```
/// use chromatic_engine::rng::{ChaChaSource, RandomSource};
///
/// let mut a = ChaChaSource::from_seed(42);
/// let mut b = ChaChaSource::from_seed(42);
/// assert_eq!(a.next_in_range(1, 6), b.next_in_range(1, 6));
/// ```
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha20Rng,
    seed: Option<u64>,
}

impl ChaChaSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Seeds from the operating system; not reproducible.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_os_rng(),
            seed: None,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for ChaChaSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }
}

/// Replays a fixed list of integers, then falls back to a seeded stream.
///
/// Scripted values outside the requested range are clamped into it.
///
/// # Examples
///
/// ```
/// use chromatic_engine::rng::{RandomSource, ScriptedSource};
///
/// let mut src = ScriptedSource::new([6, 6, 1]);
/// assert_eq!(src.next_in_range(1, 6), 6);
/// assert_eq!(src.next_in_range(1, 6), 6);
/// assert_eq!(src.next_in_range(2, 6), 2);
/// assert_eq!(src.remaining(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<u32>,
    fallback: ChaChaSource,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: values.into_iter().collect(),
            fallback: ChaChaSource::from_seed(0),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        self.fallback.next_f64()
    }

    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        match self.script.pop_front() {
            Some(v) => v.clamp(low, high),
            None => self.fallback.next_in_range(low, high),
        }
    }
}

/// Unbiased in-place Fisher-Yates (Knuth) shuffle.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly
/// chosen index in `[0, i]`.
pub fn shuffle_slice<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.next_in_range(0, i as u32) as usize;
        items.swap(i, j);
    }
}
