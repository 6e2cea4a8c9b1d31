//! Random number generator abstraction for determinism.
//!
//! In production, every request gets its own OS-seeded generator from an
//! [`RngFactory`]. In tests, a seeded or scripted implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Creates an independent generator for each unit of work.
pub trait RngFactory: Send + Sync {
    /// Returns a fresh generator.
    fn create(&self) -> Box<dyn DeterministicRng>;
}

/// `DeterministicRng` backed by `rand`'s standard generator.
#[derive(Debug, Clone)]
pub struct StdRngSource(StdRng);

impl StdRngSource {
    /// Seeds a generator from operating system entropy.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Seeds a generator from a fixed value, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for StdRngSource {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }
}

/// Production factory: one OS-seeded generator per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngFactory;

impl RngFactory for OsRngFactory {
    fn create(&self) -> Box<dyn DeterministicRng> {
        Box::new(StdRngSource::from_os_rng())
    }
}

/// Picks one element uniformly at random. Returns `None` for an empty slice.
pub fn choose<'a, T>(items: &'a [T], rng: &mut dyn DeterministicRng) -> Option<&'a T> {
    let last = items.len().checked_sub(1)?;
    let index = rng.next_u32_range(0, index_bound(last)) as usize;
    items.get(index.min(last))
}

/// Shuffles `items` in place (Fisher-Yates).
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_u32_range(0, index_bound(i)) as usize;
        items.swap(i, j.min(i));
    }
}

fn index_bound(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
