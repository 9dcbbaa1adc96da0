//! Offline block rendering.

use crate::StereoSamples;
use pocketverb_core::Effect;

/// Number of frames in `seconds` at `sample_rate`, rounded to the nearest frame.
///
/// Negative or non-finite durations give zero.
pub fn tail_frames(sample_rate: u32, seconds: f32) -> usize {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (f64::from(sample_rate) * f64::from(seconds)).round() as usize
}

/// Runs an [`Effect`] over whole files in fixed-size blocks.
///
/// Every block is one processing call on the effect, so the block size
/// sets how fast call-driven state (such as a length re-seed) advances.
///
/// # Example
///
/// ```rust
/// use pocketverb_core::StereoSamples;
/// use pocketverb_engine::PocketVerb;
/// use pocketverb_io::Renderer;
///
/// let mut renderer = Renderer::new(PocketVerb::new(), 256);
/// let out = renderer.render(&StereoSamples::impulse(1000), 500);
/// assert_eq!(out.len(), 1500);
/// ```
pub struct Renderer<E: Effect> {
    effect: E,
    block_size: usize,
}

impl<E: Effect> Renderer<E> {
    /// Wrap `effect`. A block size of zero is treated as one.
    pub fn new(effect: E, block_size: usize) -> Self {
        Self {
            effect,
            block_size: block_size.max(1),
        }
    }

    /// Frames per processing call.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The wrapped effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Render `input` followed by `tail` frames of silence.
    pub fn render(&mut self, input: &StereoSamples, tail: usize) -> StereoSamples {
        self.render_with_progress(input, tail, |_, _| {})
    }

    /// Like [`render`](Self::render), calling `progress(done, total)` after every block.
    pub fn render_with_progress<F>(
        &mut self,
        input: &StereoSamples,
        tail: usize,
        mut progress: F,
    ) -> StereoSamples
    where
        F: FnMut(usize, usize),
    {
        let mut output = input.clone();
        output.pad_silence(tail);
        let total = output.len();

        tracing::debug!(
            frames = input.len(),
            tail,
            block_size = self.block_size,
            "rendering"
        );

        let mut done = 0;
        for (left, right) in output
            .left
            .chunks_mut(self.block_size)
            .zip(output.right.chunks_mut(self.block_size))
        {
            self.effect.process_block_stereo_inplace(left, right);
            done += left.len();
            progress(done, total);
        }

        output
    }
}
