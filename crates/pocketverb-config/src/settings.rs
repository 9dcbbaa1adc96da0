//! The render settings document.

use pocketverb_engine::{Controls, PocketVerb, Topology};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Processing block size when none is given.
pub const DEFAULT_BLOCK_SIZE: usize = 512;
/// Largest accepted block size.
pub const MAX_BLOCK_SIZE: usize = 65_536;
/// Reverb tail appended after the input when none is given.
pub const DEFAULT_TAIL_SECONDS: f32 = 2.0;
/// Longest accepted tail.
pub const MAX_TAIL_SECONDS: f32 = 60.0;

/// Settings for one offline render.
///
/// Every table and field is optional; missing values take the defaults
/// shown below.
///
/// # TOML Format
///
/// ```toml
/// [controls]
/// room_type = 0.0   # or: room = "chamber"
/// size = 0.5
/// gate = 0.0
/// mix = 0.5
///
/// [dither]
/// enabled = true
/// seed = 17
///
/// [render]
/// block_size = 512
/// tail_seconds = 2.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    /// The four engine controls.
    pub controls: ControlSettings,
    /// Output dither.
    pub dither: DitherSettings,
    /// Block and tail options.
    pub render: RenderOptions,
}

/// The four normalized controls, plus an optional room name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlSettings {
    /// Type control A.
    pub room_type: f32,
    /// Size control B.
    pub size: f32,
    /// Gate control C.
    pub gate: f32,
    /// Mix control D.
    pub mix: f32,
    /// Room by name; overrides `room_type` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl Default for ControlSettings {
    fn default() -> Self {
        let controls = Controls::DEFAULT;
        Self {
            room_type: controls.room_type,
            size: controls.size,
            gate: controls.gate,
            mix: controls.mix,
            room: None,
        }
    }
}

impl ControlSettings {
    /// The selected room: `room` by name if present, else `room_type`.
    pub fn topology(&self) -> Result<Topology, ConfigError> {
        match &self.room {
            Some(name) => {
                Topology::from_name(name).ok_or_else(|| ConfigError::UnknownRoom(name.clone()))
            }
            None => Ok(Topology::from_control(self.room_type)),
        }
    }

    /// Resolve to engine controls, with the room name folded into Type.
    pub fn to_controls(&self) -> Result<Controls, ConfigError> {
        let room_type = match &self.room {
            Some(_) => self.topology()?.control_value(),
            None => self.room_type,
        };
        Ok(Controls::new(room_type, self.size, self.gate, self.mix))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("room_type", self.room_type),
            ("size", self.size),
            ("gate", self.gate),
            ("mix", self.mix),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidControl { name, value });
            }
        }
        self.topology().map(|_| ())
    }
}

/// Output dither settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DitherSettings {
    /// Add sub-LSB noise to the output.
    pub enabled: bool,
    /// Generator seed, must be non-zero.
    pub seed: u32,
}

impl Default for DitherSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: pocketverb_engine::DEFAULT_SEED,
        }
    }
}

/// Block and tail options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    /// Frames per processing call.
    pub block_size: usize,
    /// Silence rendered after the input, in seconds.
    pub tail_seconds: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            tail_seconds: DEFAULT_TAIL_SECONDS,
        }
    }
}

impl RenderSettings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Check every value. The first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controls.validate()?;

        if self.dither.seed == 0 {
            return Err(ConfigError::InvalidSeed(0));
        }

        let block = self.render.block_size;
        if block == 0 || block > MAX_BLOCK_SIZE {
            return Err(ConfigError::InvalidBlockSize(block));
        }

        let tail = self.render.tail_seconds;
        if !tail.is_finite() || !(0.0..=MAX_TAIL_SECONDS).contains(&tail) {
            return Err(ConfigError::InvalidTail(tail));
        }

        Ok(())
    }

    /// An engine configured from these settings.
    pub fn build_engine(&self) -> Result<PocketVerb, ConfigError> {
        let mut verb = PocketVerb::with_seed(self.dither.seed);
        verb.set_dither_enabled(self.dither.enabled);
        verb.set_controls(self.controls.to_controls()?);
        Ok(verb)
    }
}
