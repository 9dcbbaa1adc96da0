//! PocketVerb Core - DSP primitives for the pocketverb reverb engine
//!
//! This crate provides the building blocks the reverb network is assembled
//! from, designed for real-time processing with zero allocation in the audio
//! path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe stereo processing trait
//! - [`ParameterInfo`] - Runtime parameter discovery, display and parsing
//!
//! ## Diffusion
//!
//! - [`Tap`] - Named allpass element with inner and outer rings
//! - [`AllpassRing`] - Backward-walking ring buffer with the asymmetric wrap
//!
//! ## Shaping & Dynamics
//!
//! - [`Saturator`] - Sine soft clipper and its inverse
//! - [`PeakFollower`] - Linear-release peak tracker gating the wetness
//!
//! ## Output
//!
//! - [`Ditherer`] / [`Xorshift32`] - Exponent-scaled dither and denormal guard
//! - [`StereoSamples`] - Owned stereo buffers for offline rendering
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! pocketverb-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: Buffers are sized once at construction
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **f32 at the edges, f64 inside**: Samples enter and leave as `f32`

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod dither;
pub mod effect;
pub mod envelope;
pub mod math;
pub mod param_info;
pub mod saturator;
pub mod stereo_samples;
pub mod tap;

// Re-export main types at crate root
pub use dither::{DEFAULT_SEED, Ditherer, Xorshift32};
pub use effect::{Effect, common_len};
pub use envelope::{PeakFollower, gated_wetness};
pub use math::{DENORMAL_FILL_SCALE, DENORMAL_THRESHOLD, pin_unit, sign, wet_dry_mix};
pub use param_info::{
    ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo, format_percent, parse_percent,
};
pub use saturator::Saturator;
pub use stereo_samples::StereoSamples;
pub use tap::{ALLPASS_FEEDBACK, AllpassRing, HISTORY_SLOTS, INITIAL_LENGTH, Pass, Tap, wrap_back};
