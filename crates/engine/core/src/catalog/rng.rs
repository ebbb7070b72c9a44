//! Deterministic random number generation for combat variance.
//!
//! Combat must be replayable: the same world seed and action sequence
//! always resolve the same way. This module provides a small PCG-XSH-RR
//! generator (32-bit output from 64-bit state) plus a seed mixer that
//! derives a fresh stream per encounter.

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: a single multiply + xorshift + rotate per draw, 64 bits of
/// state, good statistical quality for game mechanics.
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        // One warm-up step decorrelates adjacent seeds.
        Self {
            state: Self::step(seed ^ Self::INCREMENT),
        }
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then random rotate.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }

    /// Draws a value in `[0, bound)`. Returns 0 for a zero bound.
    pub fn bounded(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }
}

/// Mixes a world seed with per-invocation entropy into an encounter seed.
///
/// `nonce` is the session's action counter, so the same encounter fought
/// twice in one session still draws distinct streams.
pub fn compute_seed(world_seed: u64, nonce: u64, context: u32) -> u64 {
    let mut hash = world_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::new(1);
        let mut b = PcgRng::new(2);
        let draws_a: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let draws_b: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn bounded_respects_bound() {
        let mut rng = PcgRng::new(7);
        for _ in 0..100 {
            assert!(rng.bounded(3) < 3);
        }
        assert_eq!(rng.bounded(0), 0);
    }

    #[test]
    fn compute_seed_varies_with_nonce() {
        let base = compute_seed(99, 0, 0);
        assert_ne!(base, compute_seed(99, 1, 0));
        assert_ne!(base, compute_seed(99, 0, 1));
    }
}
