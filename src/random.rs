use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomProvider {
    /// Inclusive on both ends.
    fn random_int(&mut self, min: u16, max: u16) -> u16;

    fn random_index(&mut self, count: usize) -> usize;
}

pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        StdRandom { rng }
    }
}

impl RandomProvider for StdRandom {
    fn random_int(&mut self, min: u16, max: u16) -> u16 {
        self.rng.gen_range(min..=max)
    }

    fn random_index(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }
}

/// Replays scripted draws, clamped into the requested range. An empty
/// queue yields the lower bound.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    ints: VecDeque<u16>,
    indices: VecDeque<usize>,
    int_calls: Vec<(u16, u16)>,
    index_calls: Vec<usize>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ints(mut self, ints: &[u16]) -> Self {
        self.ints.extend(ints);
        self
    }

    pub fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn int_calls(&self) -> &[(u16, u16)] {
        &self.int_calls
    }

    pub fn index_calls(&self) -> &[usize] {
        &self.index_calls
    }
}

impl RandomProvider for ScriptedRandom {
    fn random_int(&mut self, min: u16, max: u16) -> u16 {
        self.int_calls.push((min, max));
        self.ints.pop_front().unwrap_or(min).clamp(min, max)
    }

    fn random_index(&mut self, count: usize) -> usize {
        self.index_calls.push(count);
        self.indices.pop_front().unwrap_or(0).min(count.saturating_sub(1))
    }
}
