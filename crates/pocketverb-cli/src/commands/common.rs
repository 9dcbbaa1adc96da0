//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pocketverb_config::RenderSettings;
use pocketverb_engine::Topology;
use std::path::PathBuf;

/// Settings file plus per-field overrides.
///
/// Flags win over the file; the file wins over the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Render settings file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Room by name (chamber, spring, tiled, room, stretch, zarathustra) or number 1-6
    #[arg(short, long, value_parser = parse_room)]
    pub room: Option<Topology>,

    /// Size control, 0.0-1.0
    #[arg(short, long)]
    pub size: Option<f32>,

    /// Gate control, 0.0-1.0
    #[arg(short, long)]
    pub gate: Option<f32>,

    /// Mix control, 0.0-1.0
    #[arg(short, long)]
    pub mix: Option<f32>,

    /// Dither generator seed (non-zero)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Disable output dither
    #[arg(long)]
    pub no_dither: bool,

    /// Frames per processing call
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Seconds of reverb tail rendered after the input
    #[arg(long)]
    pub tail: Option<f32>,
}

impl SettingsArgs {
    /// Load the file (if any), apply overrides and validate.
    pub fn resolve(&self) -> anyhow::Result<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => RenderSettings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => RenderSettings::default(),
        };

        if let Some(room) = self.room {
            settings.controls.room = Some(room.name().to_string());
        }
        if let Some(size) = self.size {
            settings.controls.size = size;
        }
        if let Some(gate) = self.gate {
            settings.controls.gate = gate;
        }
        if let Some(mix) = self.mix {
            settings.controls.mix = mix;
        }
        if let Some(seed) = self.seed {
            settings.dither.seed = seed;
        }
        if self.no_dither {
            settings.dither.enabled = false;
        }
        if let Some(block_size) = self.block_size {
            settings.render.block_size = block_size;
        }
        if let Some(tail) = self.tail {
            settings.render.tail_seconds = tail;
        }

        settings.validate()?;
        tracing::debug!(?settings, "resolved render settings");
        Ok(settings)
    }
}

/// Parse a room name or a 1-based room number for clap's `value_parser`.
pub fn parse_room(s: &str) -> Result<Topology, String> {
    if let Some(room) = Topology::from_name(s) {
        return Ok(room);
    }
    s.trim()
        .parse::<u8>()
        .ok()
        .and_then(Topology::from_number)
        .ok_or_else(|| {
            let names: Vec<&str> = Topology::ALL.iter().map(|t| t.name()).collect();
            format!("unknown room '{}' (expected one of {} or 1-6)", s, names.join(", "))
        })
}

/// A frame-count progress bar on stderr.
pub fn progress_bar(total: usize) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// Peak level in dBFS, floored at -120.
pub fn peak_db(peak: f32) -> f32 {
    if peak <= 0.0 {
        -120.0
    } else {
        (20.0 * peak.log10()).max(-120.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_room_accepts_names_and_numbers() {
        assert_eq!(parse_room("spring"), Ok(Topology::Spring));
        assert_eq!(parse_room(" Room "), Ok(Topology::Room));
        assert_eq!(parse_room("6"), Ok(Topology::Zarathustra));
        assert!(parse_room("0").is_err());
        assert!(parse_room("hall").unwrap_err().contains("Chamber"));
    }

    #[test]
    fn overrides_win_over_defaults() {
        let args = SettingsArgs {
            room: Some(Topology::Tiled),
            size: Some(0.9),
            no_dither: true,
            tail: Some(0.0),
            ..SettingsArgs::default()
        };
        let settings = args.resolve().unwrap();
        assert_eq!(settings.controls.room.as_deref(), Some("Tiled"));
        assert_eq!(settings.controls.size, 0.9);
        assert_eq!(settings.controls.mix, 0.5);
        assert!(!settings.dither.enabled);
        assert_eq!(settings.render.tail_seconds, 0.0);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = SettingsArgs {
            mix: Some(2.0),
            ..SettingsArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn peak_db_floors() {
        assert_eq!(peak_db(0.0), -120.0);
        assert!((peak_db(1.0)).abs() < 1e-6);
        assert!((peak_db(0.5) + 6.0206).abs() < 1e-3);
    }
}
