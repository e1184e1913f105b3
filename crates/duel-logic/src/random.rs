//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible automated players.
//! Uses a simple but effective xorshift algorithm.

use crate::player::MovePicker;

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        // Splitmix-style scramble so nearby seeds do not produce
        // nearby initial states
        let mut state = seed.wrapping_add(0x9e3779b97f4a7c15);
        state = (state ^ (state >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        state = (state ^ (state >> 27)).wrapping_mul(0x94d049bb133111eb);
        state ^= state >> 31;

        // xorshift state must never be zero
        let mut rng = Self { state: state | 1 };

        // Warm up the generator
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Uniform index into a collection of `len` elements
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }
}

impl MovePicker for SeededRng {
    fn pick_uniform(&mut self, len: usize) -> usize {
        self.pick_index(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut r1 = SeededRng::new(42);
        let mut r2 = SeededRng::new(42);

        for _ in 0..100 {
            assert_eq!(r1.next_u64(), r2.next_u64());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SeededRng::new(1);
        let mut rng2 = SeededRng::new(2);

        let vals1: Vec<_> = (0..10).map(|_| rng1.next_u64()).collect();
        let vals2: Vec<_> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_next_range() {
        let mut rng = SeededRng::new(42);

        for max in [1, 3, 5, 100, 1000].iter() {
            for _ in 0..100 {
                let val = rng.next_range(*max);
                assert!(val < *max, "next_range({}) returned {}", max, val);
            }
        }

        // Edge case: max = 0
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_pick_index_covers_all_slots() {
        let mut rng = SeededRng::new(7);
        let mut seen = [false; 5];

        for _ in 0..500 {
            seen[rng.pick_index(5)] = true;
        }

        assert!(seen.iter().all(|s| *s), "all 5 slots should be hit: {:?}", seen);
    }

    #[test]
    fn test_zero_seed_still_generates() {
        let mut rng = SeededRng::new(0);
        let vals: Vec<_> = (0..10).map(|_| rng.next_u64()).collect();
        assert!(vals.iter().any(|v| *v != 0));
    }
}
