//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use storymap_core::rng::{DeterministicRng, RngFactory, StdRngSource};

/// A no-op RNG that always returns `min`. `choose` therefore always picks
/// the first element. Suitable for tests that do not depend on specific
/// random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that need specific, repeatable
/// choices (e.g., which successor a random walk takes).
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}

/// Factory handing out a `MockRng` per call.
#[derive(Debug, Clone, Copy)]
pub struct MockRngFactory;

impl RngFactory for MockRngFactory {
    fn create(&self) -> Box<dyn DeterministicRng> {
        Box::new(MockRng)
    }
}

/// Factory handing out a generator seeded with the same value on every call.
#[derive(Debug, Clone, Copy)]
pub struct SeededRngFactory(pub u64);

impl RngFactory for SeededRngFactory {
    fn create(&self) -> Box<dyn DeterministicRng> {
        Box::new(StdRngSource::seeded(self.0))
    }
}
