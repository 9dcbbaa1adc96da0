//! Floating-point dither and denormal guard.
//!
//! A 32-bit xorshift generator produces noise scaled to the binary exponent
//! of each output sample, so the dither always sits just below the last
//! mantissa bit of the `f32` the sample is truncated to. The same generator
//! state replaces near-zero inputs before they reach the feedback network.

use crate::math::{DENORMAL_FILL_SCALE, DENORMAL_THRESHOLD};

/// Seed used when none is given, and in place of a zero seed.
pub const DEFAULT_SEED: u32 = 17;

const NOISE_CENTER: f64 = 0x7fff_ffff as f64;
const NOISE_SCALE: f64 = 5.5e-36;
const EXPONENT_OFFSET: i32 = 62;

/// Marsaglia xorshift with the 13/17/5 shift triple.
///
/// # Example
///
/// ```rust
/// use pocketverb_core::Xorshift32;
///
/// let mut a = Xorshift32::new(17);
/// let mut b = Xorshift32::new(17);
/// assert_eq!(a.next_u32(), b.next_u32());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Create a generator. A zero seed would lock the generator at zero and
    /// is replaced by [`DEFAULT_SEED`].
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Current state without advancing.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the new state.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Output dither plus the input denormal guard, sharing one generator.
#[derive(Debug, Clone)]
pub struct Ditherer {
    rng: Xorshift32,
    seed: u32,
    enabled: bool,
}

impl Ditherer {
    /// Create an enabled ditherer.
    pub fn new(seed: u32) -> Self {
        let rng = Xorshift32::new(seed);
        Self {
            rng,
            seed: rng.state(),
            enabled: true,
        }
    }

    /// Enable or disable output dither. The denormal guard stays active.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether output dither is applied.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current generator state.
    pub fn state(&self) -> u32 {
        self.rng.state()
    }

    /// Replace a near-zero input with a tiny value derived from the generator.
    ///
    /// Does not advance the generator.
    #[inline]
    pub fn guard(&self, x: f64) -> f64 {
        if x.abs() < DENORMAL_THRESHOLD {
            f64::from(self.rng.state()) * DENORMAL_FILL_SCALE
        } else {
            x
        }
    }

    /// Add exponent-scaled noise to an output sample.
    ///
    /// Advances the generator only when dither is enabled.
    #[inline]
    pub fn apply(&mut self, x: f64) -> f64 {
        if !self.enabled {
            return x;
        }
        let (_, exponent) = libm::frexpf(x as f32);
        let noise = f64::from(self.rng.next_u32()) - NOISE_CENTER;
        x + libm::ldexp(noise * NOISE_SCALE, exponent + EXPONENT_OFFSET)
    }

    /// Rewind the generator to its seed.
    pub fn reset(&mut self) {
        self.rng = Xorshift32::new(self.seed);
    }
}

impl Default for Ditherer {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
