//! Peak follower that gates the reverb's wetness.
//!
//! The peak decays linearly by a fixed release per sample, jumps up to
//! `|2 · dry|` on loud input and never exceeds 1. A zero release disables
//! gating entirely and pins the peak at 1.

/// Linear-release peak tracker.
///
/// # Example
///
/// ```rust
/// use pocketverb_core::PeakFollower;
///
/// let mut env = PeakFollower::new();
/// env.set_release(0.25);
/// assert_eq!(env.process(0.0), 0.75);
/// assert_eq!(env.process(0.2), 0.5);
/// assert_eq!(env.process(0.75), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PeakFollower {
    peak: f64,
    release: f64,
}

impl PeakFollower {
    /// Create a follower with the peak at 1 and no release.
    pub fn new() -> Self {
        Self {
            peak: 1.0,
            release: 0.0,
        }
    }

    /// Set the per-sample linear release.
    pub fn set_release(&mut self, release: f64) {
        self.release = release.max(0.0);
    }

    /// Current release.
    pub fn release(&self) -> f64 {
        self.release
    }

    /// Current peak without advancing.
    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Advance by one dry sample and return the new peak.
    #[inline]
    pub fn process(&mut self, dry: f64) -> f64 {
        if self.release <= 0.0 {
            self.peak = 1.0;
        } else {
            self.peak -= self.release;
            self.peak = self.peak.max((2.0 * dry).abs()).min(1.0);
        }
        self.peak
    }

    /// Return the peak to 1.
    pub fn reset(&mut self) {
        self.peak = 1.0;
    }
}

impl Default for PeakFollower {
    fn default() -> Self {
        Self::new()
    }
}

/// Effective wetness for one sample: the wet target scaled by the peak.
#[inline]
pub fn gated_wetness(wet_target: f64, peak: f64) -> f64 {
    wet_target * peak
}
