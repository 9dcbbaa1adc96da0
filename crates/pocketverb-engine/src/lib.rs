//! PocketVerb Engine - six-topology allpass diffusion reverb
//!
//! This crate assembles the primitives from `pocketverb-core` into the
//! reverb network:
//!
//! - [`PocketVerb`] - The stereo engine (implements [`Effect`] and [`ParameterInfo`])
//! - [`Topology`] - The six room characters and their static cross-feed tables
//! - [`TapBank`] - One channel's 26 taps, run as an inner and an outer pass
//! - [`LengthScheduler`] - One-tap-per-call re-seeding after a Size change
//! - [`Controls`] - The four normalized controls and their mappings
//!
//! ## Signal Flow
//!
//! ```text
//! per call:   re-seed next pending tap (both channels)
//! per sample: denormal guard -> peak follower -> saturate
//!             -> inner pass -> outer pass -> output rule
//!             -> inverse saturate -> gated wet/dry -> dither
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pocketverb_core::{Effect, ParameterInfo};
//! use pocketverb_engine::PocketVerb;
//!
//! let mut verb = PocketVerb::new();
//! let size = verb.find_param_by_name("Size").unwrap();
//! verb.set_param(size, 0.8);
//!
//! let (l, r) = verb.process_stereo(0.5, 0.5);
//! assert!(l.is_finite() && r.is_finite());
//! ```
//!
//! ## Logging
//!
//! With the `tracing` feature enabled, re-seed sweeps and topology switches
//! are logged at `debug`. Nothing is logged per sample.
//!
//! [`Effect`]: pocketverb_core::Effect
//! [`ParameterInfo`]: pocketverb_core::ParameterInfo

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod bank;
pub mod controls;
pub mod engine;
pub mod scheduler;
pub mod topology;

// Re-export main types at crate root
pub use bank::{MAX_LENGTHS, TAP_COUNT, TapBank};
pub use controls::Controls;
pub use engine::PocketVerb;
pub use pocketverb_core::DEFAULT_SEED;
pub use scheduler::{LengthScheduler, SchedulerState, near_prime, target_length};
pub use topology::{OutputRule, Recipe, Source, Topology, Window};
