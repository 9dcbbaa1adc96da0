//! Render settings for the pocketverb reverb.
//!
//! A [`RenderSettings`] document holds everything an offline render needs:
//! the four controls, the dither generator and the block/tail options.
//!
//! # Example
//!
//! ```rust
//! use pocketverb_config::RenderSettings;
//!
//! let settings = RenderSettings::from_toml(r#"
//!     [controls]
//!     room = "spring"
//!     size = 0.8
//!
//!     [render]
//!     tail_seconds = 4.0
//! "#).unwrap();
//!
//! settings.validate().unwrap();
//! let verb = settings.build_engine().unwrap();
//! assert_eq!(verb.topology().name(), "Spring");
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    ControlSettings, DEFAULT_BLOCK_SIZE, DEFAULT_TAIL_SECONDS, DitherSettings, MAX_BLOCK_SIZE,
    MAX_TAIL_SECONDS, RenderOptions, RenderSettings,
};
