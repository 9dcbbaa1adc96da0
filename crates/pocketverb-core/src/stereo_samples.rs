//! Owned stereo buffers for offline rendering.
//!
//! [`StereoSamples`] is the interchange type between WAV I/O and the engine:
//! two equal-length `Vec<f32>` channels with mono and interleaved conversion.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// A pair of equal-length channel buffers.
///
/// # Example
///
/// ```rust
/// use pocketverb_core::StereoSamples;
///
/// let mut samples = StereoSamples::impulse(4);
/// samples.pad_silence(2);
/// assert_eq!(samples.len(), 6);
/// assert_eq!(samples.left[0], 1.0);
/// assert_eq!(samples.peak(), 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel.
    pub left: Vec<f32>,
    /// Right channel.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Build from two channels, truncating the longer one to the shorter.
    pub fn new(mut left: Vec<f32>, mut right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len(), "channels must have the same length");
        let len = left.len().min(right.len());
        left.truncate(len);
        right.truncate(len);
        Self { left, right }
    }

    /// `len` frames of silence.
    pub fn silence(len: usize) -> Self {
        Self {
            left: vec![0.0; len],
            right: vec![0.0; len],
        }
    }

    /// A unit impulse on both channels followed by `len - 1` zeros.
    pub fn impulse(len: usize) -> Self {
        let mut samples = Self::silence(len);
        if len > 0 {
            samples.left[0] = 1.0;
            samples.right[0] = 1.0;
        }
        samples
    }

    /// Duplicate a mono signal to both channels.
    pub fn from_mono(mono: Vec<f32>) -> Self {
        Self {
            left: mono.clone(),
            right: mono,
        }
    }

    /// Split interleaved `L, R, L, R, ...` data. A trailing odd sample is dropped.
    pub fn from_interleaved(interleaved: &[f32]) -> Self {
        let (left, right) = interleaved
            .chunks_exact(2)
            .map(|frame| (frame[0], frame[1]))
            .unzip();
        Self { left, right }
    }

    /// Interleave into `L, R, L, R, ...`.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut interleaved = Vec::with_capacity(self.len() * 2);
        for (l, r) in self.left.iter().zip(&self.right) {
            interleaved.push(*l);
            interleaved.push(*r);
        }
        interleaved
    }

    /// Average the channels.
    pub fn to_mono(&self) -> Vec<f32> {
        self.left
            .iter()
            .zip(&self.right)
            .map(|(l, r)| (l + r) * 0.5)
            .collect()
    }

    /// Frames per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Append `frames` of silence (a reverb tail).
    pub fn pad_silence(&mut self, frames: usize) {
        let len = self.len() + frames;
        self.left.resize(len, 0.0);
        self.right.resize(len, 0.0);
    }

    /// Largest absolute sample across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(&self.right)
            .fold(0.0_f32, |acc, s| acc.max(s.abs()))
    }
}
