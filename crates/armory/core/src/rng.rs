//! Deterministic random number generation for the roll engine.
//!
//! The production randomness source is a collaborator detail; the core only
//! requires the [`RollRng`] stream so that every roll is reproducible from a
//! seed in tests.

/// Random stream consumed by the container roll engine.
///
/// Implementations must be deterministic: the same seed must produce the
/// same sequence of draws.
pub trait RollRng {
    /// Next raw 32-bit draw.
    fn next_u32(&mut self) -> u32;

    /// Uniform draw in `[0, 1)` with 53 bits of precision.
    fn next_f64(&mut self) -> f64 {
        let hi = (self.next_u32() as u64) << 32;
        let bits = hi | self.next_u32() as u64;
        (bits >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform draw in `[min, max]` inclusive.
    fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + self.next_u32() % span
    }

    /// Uniform draw in `[min, max]`.
    fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        min + self.next_f64() * (max - min)
    }

    /// Uniform index into a slice of the given length. Length must be > 0.
    fn index(&mut self, len: usize) -> usize {
        (self.next_u32() as usize) % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit output via xorshift-high plus a
/// state-derived rotation. Small, fast, and passes the usual statistical
/// batteries, which is all the roll engine needs.
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a stream seeded deterministically from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output function: xorshift the high bits, then rotate by the
    /// top bits of the pre-advance state.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RollRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let prev = self.state;
        self.step();
        Self::output(prev)
    }
}
