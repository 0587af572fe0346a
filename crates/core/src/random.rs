//! Seeded pseudo-random stream shared by map generation and boss selection.
//!
//! Backed by ChaCha8. The 32-bit seed is widened to `u64` by its unsigned bit
//! pattern and expanded with `SeedableRng::seed_from_u64`, which rand_core
//! documents as portable, so identical seeds give identical streams on every
//! target.

use std::fmt;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::seed::{SeedHash, mix_seed_stream};

#[derive(Clone)]
pub struct DeterministicRandom {
    seed: SeedHash,
    stream: u64,
    rng: ChaCha8Rng,
}

impl DeterministicRandom {
    pub fn new(seed: SeedHash) -> Self {
        Self { seed, stream: 0, rng: ChaCha8Rng::seed_from_u64(widen(seed)) }
    }

    /// Independent sub-stream of `seed`. Two derivations with the same
    /// `(seed, stream)` pair are identical; different streams are unrelated.
    pub fn derive(seed: SeedHash, stream: u64) -> Self {
        let state = mix_seed_stream(widen(seed), stream);
        Self { seed, stream, rng: ChaCha8Rng::seed_from_u64(state) }
    }

    pub fn seed(&self) -> SeedHash {
        self.seed
    }

    pub fn stream(&self) -> u64 {
        self.stream
    }

    /// Non-negative value in `[0, i32::MAX)`.
    pub fn next_int(&mut self) -> i32 {
        let scaled = (u64::from(self.rng.next_u32()) * (i32::MAX as u64)) >> 32;
        scaled as i32
    }

    /// Value in `[min, max)`. Returns `min` when the range is empty.
    pub fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (i64::from(max) - i64::from(min)) as u64;
        let offset = (u64::from(self.rng.next_u32()) * span) >> 32;
        (i64::from(min) + offset as i64) as i32
    }

    /// Value in `[0, 1)` built from the top 53 bits of one draw.
    pub fn next_double(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    /// Value in `[0, 1)` built from the top 24 bits of one draw.
    pub fn next_float(&mut self) -> f32 {
        (self.rng.next_u32() >> 8) as f32 * (1.0 / (1_u32 << 24) as f32)
    }

    pub fn next_bool(&mut self, probability: f64) -> bool {
        self.next_double() < probability
    }

    /// Index in `[0, len)`; `0` for an empty range.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((u128::from(self.rng.next_u64()) * len as u128) >> 64) as usize
    }

    /// Picks an index with probability proportional to its weight.
    /// `None` when every weight is zero.
    pub fn choose_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&weight| u64::from(weight)).sum();
        if total == 0 {
            return None;
        }
        let mut roll = ((u128::from(self.rng.next_u64()) * u128::from(total)) >> 64) as u64;
        for (index, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if roll < weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }

    /// Fisher-Yates, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for index in (1..items.len()).rev() {
            let other = self.next_index(index + 1);
            items.swap(index, other);
        }
    }
}

impl fmt::Debug for DeterministicRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeterministicRandom")
            .field("seed", &self.seed)
            .field("stream", &self.stream)
            .finish_non_exhaustive()
    }
}

fn widen(seed: SeedHash) -> u64 {
    u64::from(seed as u32)
}
