//! Impulse response rendering command.

use super::common::{SettingsArgs, peak_db};
use clap::Args;
use pocketverb_core::StereoSamples;
use pocketverb_io::{Renderer, WavSpec, tail_frames, write_wav_stereo};
use std::path::PathBuf;

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Sample rate written to the file header
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

/// Render a unit impulse on both channels followed by the configured tail.
pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;
    let verb = settings.build_engine()?;
    let room = verb.topology();

    let tail = tail_frames(args.sample_rate, settings.render.tail_seconds);
    let mut renderer = Renderer::new(verb, settings.render.block_size);
    let response = renderer.render(&StereoSamples::impulse(1), tail);

    println!(
        "{} impulse response: {} frames, peak {:.1} dB",
        room,
        response.len(),
        peak_db(response.peak())
    );

    let spec = WavSpec {
        channels: 2,
        sample_rate: args.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    write_wav_stereo(&args.output, &response, spec)?;
    println!("Wrote {}", args.output.display());

    Ok(())
}
