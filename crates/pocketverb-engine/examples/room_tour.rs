//! Tour of the six rooms
//!
//! Renders a short impulse response per room and prints how much energy
//! lands in each 50 ms window, then shows a size change re-seeding one
//! tap per processing call.
//!
//! Run with: cargo run -p pocketverb-engine --example room_tour

use pocketverb_core::Effect;
use pocketverb_engine::{Controls, PocketVerb, TAP_COUNT, Topology};

const SAMPLE_RATE: usize = 48000;
const WINDOW: usize = SAMPLE_RATE / 20;
const BLOCK: usize = 256;

fn main() {
    println!("PocketVerb Room Tour");
    println!("====================\n");

    println!("{:12}  {}", "Room", "energy per 50 ms window (dB)");
    for room in Topology::ALL {
        let mut verb = PocketVerb::new();
        verb.set_controls(Controls::new(room.control_value(), 0.5, 0.0, 1.0));

        let mut left = vec![0.0_f32; SAMPLE_RATE / 2];
        let mut right = left.clone();
        left[0] = 1.0;
        right[0] = 1.0;
        for (l, r) in left.chunks_mut(BLOCK).zip(right.chunks_mut(BLOCK)) {
            verb.process_block_stereo_inplace(l, r);
        }

        let windows: Vec<String> = left
            .chunks(WINDOW)
            .map(|w| {
                let energy: f32 = w.iter().map(|s| s * s).sum();
                format!("{:6.1}", 10.0 * energy.max(1e-12).log10())
            })
            .collect();
        println!("{:12}  {}", room.name(), windows.join(" "));
    }

    println!("\nRe-seed after a size change");
    println!("---------------------------");
    let mut verb = PocketVerb::new();
    let mut left = [0.0_f32; BLOCK];
    let mut right = [0.0_f32; BLOCK];
    verb.process_block_stereo_inplace(&mut left, &mut right);
    verb.set_size(1.0);
    for call in 1..=TAP_COUNT {
        verb.process_block_stereo_inplace(&mut left, &mut right);
        if call % 5 == 0 || call == TAP_COUNT {
            let lengths = verb.tap_lengths();
            println!(
                "call {:2}: pending {:2}  A={} M={} Z={}",
                call,
                verb.countdown(),
                lengths[0],
                lengths[12],
                lengths[25]
            );
        }
    }
}
