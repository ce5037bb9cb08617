//! Deterministic pseudo-random source for synthetic test inputs
//!
//! Explicit state, explicit seeding, no global anything: a seeded generator
//! replays the exact same sequence forever, so any failing fuzz run is
//! reproducible byte for byte. Not cryptographically secure, and not meant
//! to be.

use crate::types::Hash;

/// xorshift64 generator with caller-owned state
#[derive(Debug, Clone)]
pub struct InsecureRand {
    state: u64,
}

impl InsecureRand {
    /// Create a generator from a seed. A zero seed is remapped to a fixed
    /// odd constant; xorshift state must never be zero.
    pub fn new(seed: u64) -> Self {
        InsecureRand {
            state: if seed == 0 { 0x9e37_79b9_7f4a_7c15 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    /// Uniform-enough draw in `[0, upper)`; `upper` must be positive
    pub fn rand_range(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0, "rand_range upper bound must be positive");
        (self.next_u64() % upper as u64) as usize
    }

    pub fn rand_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }

    /// Draw 32 random bytes
    pub fn rand_hash(&mut self) -> Hash {
        let mut hash = [0u8; 32];
        for chunk in hash.chunks_exact_mut(8) {
            chunk.copy_from_slice(&self.next_u64().to_le_bytes());
        }
        hash
    }
}
