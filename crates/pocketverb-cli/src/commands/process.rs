//! File-based reverb rendering command.

use super::common::{SettingsArgs, peak_db, progress_bar};
use clap::Args;
use pocketverb_io::{Renderer, WavSpec, read_wav_stereo, tail_frames, write_wav_stereo};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (always stereo)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;

    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav_stereo(&args.input)?;
    let tail = tail_frames(spec.sample_rate, settings.render.tail_seconds);
    println!(
        "  {} frames, {} Hz, {:.2}s (+{:.2}s tail)",
        input.len(),
        spec.sample_rate,
        input.len() as f64 / f64::from(spec.sample_rate),
        settings.render.tail_seconds
    );

    let verb = settings.build_engine()?;
    println!(
        "Room {} | size {:.2} gate {:.2} mix {:.2}",
        verb.topology(),
        settings.controls.size,
        settings.controls.gate,
        settings.controls.mix
    );

    let pb = progress_bar(input.len() + tail)?;
    let mut renderer = Renderer::new(verb, settings.render.block_size);
    let output = renderer.render_with_progress(&input, tail, |done, _| pb.set_position(done as u64));
    pb.finish_with_message("done");

    println!("\nStats:");
    println!("  Input:  Peak {:.1} dB", peak_db(input.peak()));
    println!("  Output: Peak {:.1} dB", peak_db(output.peak()));

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}
