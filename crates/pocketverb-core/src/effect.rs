//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam between a DSP engine and whatever drives
//! it (an offline renderer, a plugin wrapper, a test harness).
//!
//! ## Design Decisions
//!
//! - **Stereo first**: reverbs are inherently two-channel, so the
//!   primitive operation takes and returns a sample pair.
//!
//! - **Block granularity is observable**: an engine may do per-call work
//!   (parameter scheduling, coefficient updates) at the start of every block
//!   call. Callers should not assume that processing N samples one at a time
//!   is equivalent to processing them as one block.
//!
//! - **Object-safe**: `dyn Effect` works for runtime dispatch.
//!
//! - **No allocations**: all methods are designed to be called in real-time
//!   audio contexts with zero heap allocations.

/// Core trait for stereo audio effects.
///
/// # Example
///
/// ```rust
/// use pocketverb_core::Effect;
///
/// struct Swap;
///
/// impl Effect for Swap {
///     fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (right, left)
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut swap = Swap;
/// assert_eq!(swap.process_stereo(1.0, 2.0), (2.0, 1.0));
/// ```
pub trait Effect {
    /// Process a single stereo sample pair.
    ///
    /// Counts as one processing call for effects that schedule work per call.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process a block of stereo samples.
    ///
    /// Default implementation calls [`process_stereo`](Self::process_stereo)
    /// for each sample pair. Only the common prefix of the four buffers is
    /// processed.
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        debug_assert_eq!(left_in.len(), right_in.len(), "channel length mismatch");
        debug_assert!(
            left_out.len() >= left_in.len() && right_out.len() >= right_in.len(),
            "output buffers shorter than input"
        );
        let frames = common_len(&[
            left_in.len(),
            right_in.len(),
            left_out.len(),
            right_out.len(),
        ]);
        for i in 0..frames {
            let (l, r) = self.process_stereo(left_in[i], right_in[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    /// Process a block of stereo samples in place.
    fn process_block_stereo_inplace(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len(), "channel length mismatch");
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = self.process_stereo(*l, *r);
        }
    }

    /// Reset internal state.
    ///
    /// Clears delay lines and histories without changing parameters.
    fn reset(&mut self);

    /// Report processing latency in samples. Default is zero.
    fn latency_samples(&self) -> usize {
        0
    }
}

/// Smallest of a set of buffer lengths.
#[inline]
pub fn common_len(lengths: &[usize]) -> usize {
    lengths.iter().copied().min().unwrap_or(0)
}
