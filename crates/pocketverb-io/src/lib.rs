//! Audio file I/O for the pocketverb reverb.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`] for loading/saving audio
//! - **Metadata**: [`read_wav_info`] reads the header without decoding samples
//! - **Offline rendering**: [`Renderer`] runs any [`Effect`] over a whole file in blocks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pocketverb_engine::PocketVerb;
//! use pocketverb_io::{Renderer, read_wav_stereo, tail_frames, write_wav_stereo};
//!
//! let (input, spec) = read_wav_stereo("dry.wav")?;
//! let mut renderer = Renderer::new(PocketVerb::new(), 512);
//! let wet = renderer.render(&input, tail_frames(spec.sample_rate, 2.0));
//! write_wav_stereo("wet.wav", &wet, spec)?;
//! ```
//!
//! [`Effect`]: pocketverb_core::Effect

mod render;
mod wav;

pub use render::{Renderer, tail_frames};
pub use wav::{
    StereoSamples, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, read_wav_stereo,
    write_wav, write_wav_stereo,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel count cannot be read or written by this operation.
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(u16),

    /// The bit depth cannot be written (16, 24 and 32 are supported).
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
