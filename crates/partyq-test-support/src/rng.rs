//! Scripted random sources.

use partyq_core::rng::DeterministicRng;

/// Always answers the lower bound. Under [`partyq_core::rng::shuffle`] this
/// rotates the slice by one position, which keeps test expectations easy to
/// derive by hand.
#[derive(Debug, Default)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// Replays a fixed list of values, clamped into the requested range, and
/// starts over when the list runs out.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Creates the source. An empty list behaves like [`MockRng`].
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if self.values.is_empty() {
            return min;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(min, max)
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}
