//! Room and parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings

use clap::Args;
use pocketverb_core::ParameterInfo;
use pocketverb_engine::{PocketVerb, Topology};

#[derive(Args)]
pub struct RoomsArgs {
    /// Also show the four parameters and their defaults
    #[arg(long)]
    params: bool,
}

pub fn run(args: RoomsArgs) -> anyhow::Result<()> {
    println!("Rooms:");
    println!();
    println!("  {:3}  {:12}  {:6}  {}", "#", "Name", "Type", "Flag");
    println!("  {:3}  {:12}  {:6}  {}", "-", "----", "----", "----");
    for room in Topology::ALL {
        println!(
            "  {:3}  {:12}  {:6.2}  --room {}",
            room.number(),
            room.name(),
            room.control_value(),
            room.name().to_ascii_lowercase()
        );
    }

    if args.params {
        let verb = PocketVerb::new();
        println!();
        println!("Parameters:");
        println!();
        println!("  {:6}  {:6}  {}", "Name", "Short", "Default");
        println!("  {:6}  {:6}  {}", "----", "-----", "-------");
        for index in 0..verb.param_count() {
            if let Some(desc) = verb.param_info(index) {
                let shown = verb
                    .format_param(index, desc.default)
                    .unwrap_or_else(|| desc.default.to_string());
                println!("  {:6}  {:6}  {}", desc.name, desc.short_name, shown);
            }
        }
    }

    println!();
    println!("Example usage:");
    println!();
    println!("  pocketverb process input.wav output.wav --room spring --size 0.8 --mix 0.4");
    println!("  pocketverb impulse ir.wav --room zarathustra --tail 4");

    Ok(())
}
