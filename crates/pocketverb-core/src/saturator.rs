//! Sine-shaped soft saturation bracketing the diffusion network.
//!
//! The forward curve `sign(x)·sin(|x·gain|)` compresses the signal before
//! the allpass bank; the inverse curve `x - sign(x)·(1 - cos|x|)` followed by
//! `/ gain` expands it again afterwards. Both trig arguments are clamped to
//! π/2, past which the curves stop being monotonic.

use core::f64::consts::FRAC_PI_2;

use crate::math::sign;

/// Pre/post saturator with a wetness-dependent drive.
///
/// # Example
///
/// ```rust
/// use pocketverb_core::Saturator;
///
/// let sat = Saturator::from_wet(1.0);
/// let y = sat.forward(0.5);
/// assert!(y > 0.0 && y < 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturator {
    gain: f64,
}

impl Saturator {
    /// Saturator whose drive is `0.5 + 0.5 * wet`.
    pub fn from_wet(wet: f64) -> Self {
        Self {
            gain: 0.5 + 0.5 * wet,
        }
    }

    /// Current drive gain.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Forward shaping applied before the taps.
    #[inline]
    pub fn forward(&self, x: f64) -> f64 {
        let driven = (x * self.gain).abs().min(FRAC_PI_2);
        sign(x) * libm::sin(driven)
    }

    /// Inverse shaping applied after the taps, including the `1/gain` makeup.
    #[inline]
    pub fn inverse(&self, x: f64) -> f64 {
        let mag = x.abs().min(FRAC_PI_2);
        (x - sign(x) * (1.0 - libm::cos(mag))) / self.gain
    }
}

impl Default for Saturator {
    fn default() -> Self {
        Self::from_wet(0.5)
    }
}
