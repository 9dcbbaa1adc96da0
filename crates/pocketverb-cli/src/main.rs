//! PocketVerb CLI - offline renderer for the pocketverb reverb.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pocketverb")]
#[command(author, version, about = "Six-room allpass diffusion reverb", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a WAV file through the reverb
    Process(commands::process::ProcessArgs),

    /// Render the impulse response of one room
    Impulse(commands::impulse::ImpulseArgs),

    /// List the rooms and parameters
    Rooms(commands::rooms::RoomsArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
        Commands::Rooms(args) => commands::rooms::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
