//! End-to-end behaviour of the reverb engine.
//!
//! Covers the impulse response, silence handling, topology separation,
//! re-seed convergence and extreme control settings.

use pocketverb_core::{Effect, Pass, ParameterInfo};
use pocketverb_engine::{Controls, MAX_LENGTHS, PocketVerb, TAP_COUNT, Topology, target_length};

const BLOCK: usize = 64;

/// Run `left`/`right` through the engine in fixed-size blocks.
fn render(verb: &mut PocketVerb, left: &mut [f32], right: &mut [f32], block: usize) {
    for (l, r) in left.chunks_mut(block).zip(right.chunks_mut(block)) {
        verb.process_block_stereo_inplace(l, r);
    }
}

fn energy(signal: &[f32]) -> f64 {
    signal.iter().map(|&s| f64::from(s) * f64::from(s)).sum()
}

fn impulse_response(controls: Controls, len: usize) -> (Vec<f32>, Vec<f32>) {
    let mut verb = PocketVerb::new();
    verb.set_controls(controls);
    let mut left = vec![0.0; len];
    let mut right = vec![0.0; len];
    left[0] = 1.0;
    right[0] = 1.0;
    render(&mut verb, &mut left, &mut right, BLOCK);
    (left, right)
}

fn sine(len: usize) -> Vec<f32> {
    (0..len)
        .map(|n| 0.5 * (2.0 * std::f32::consts::PI * 220.0 * n as f32 / 48000.0).sin())
        .collect()
}

fn assert_cursors_in_bounds(verb: &PocketVerb) {
    for bank in [verb.left_bank(), verb.right_bank()] {
        for tap in bank.taps() {
            for pass in [Pass::Inner, Pass::Outer] {
                assert!(
                    tap.cursor(pass) <= tap.len(),
                    "tap {} cursor {} past length {}",
                    tap.name(),
                    tap.cursor(pass),
                    tap.len()
                );
            }
        }
    }
}

#[test]
fn impulse_has_decaying_tail() {
    let controls = Controls::new(0.0, 0.5, 0.0, 1.0);
    let (left, right) = impulse_response(controls, 16_000);

    assert_ne!(left[0], 1.0, "impulse should not pass through unchanged");
    assert!(left.iter().chain(&right).all(|s| s.is_finite()));

    let (silent_l, _) = {
        let mut verb = PocketVerb::new();
        verb.set_controls(controls);
        let mut l = vec![0.0; 16_000];
        let mut r = vec![0.0; 16_000];
        render(&mut verb, &mut l, &mut r, BLOCK);
        (l, r)
    };

    let tail = energy(&left[4000..12_000]);
    let floor = energy(&silent_l[4000..12_000]);
    assert!(tail > 1e-12, "tail energy {tail}");
    assert!(tail > 10.0 * floor, "tail {tail} vs floor {floor}");
}

#[test]
fn silence_stays_near_dither_floor() {
    for topology in Topology::ALL {
        let mut verb = PocketVerb::new();
        verb.set_topology(topology);
        let mut left = vec![0.0; 20_000];
        let mut right = vec![0.0; 20_000];
        render(&mut verb, &mut left, &mut right, 256);
        let peak = left.iter().chain(&right).fold(0.0_f32, |a, s| a.max(s.abs()));
        assert!(peak < 1e-5, "{topology}: silence produced {peak}");
    }
}

#[test]
fn topologies_diverge_within_50_samples() {
    let input = sine(50);
    let outputs: Vec<Vec<u32>> = Topology::ALL
        .iter()
        .map(|&topology| {
            let mut verb = PocketVerb::new();
            verb.set_controls(Controls::new(topology.control_value(), 0.5, 0.0, 1.0));
            input
                .iter()
                .map(|&x| verb.process_stereo(x, x).0.to_bits())
                .collect()
        })
        .collect();

    for a in 0..outputs.len() {
        for b in (a + 1)..outputs.len() {
            assert_ne!(
                outputs[a],
                outputs[b],
                "{} and {} produced identical output",
                Topology::ALL[a],
                Topology::ALL[b]
            );
        }
    }
}

#[test]
fn reseed_converges_after_26_calls() {
    let mut verb = PocketVerb::new();
    let mut left = [0.1_f32; BLOCK];
    let mut right = [-0.1_f32; BLOCK];

    // Settle at the default size first
    for _ in 0..TAP_COUNT {
        verb.process_block_stereo_inplace(&mut left, &mut right);
    }
    assert!(!verb.is_reseeding());

    verb.set_size(0.9);
    let target: [usize; TAP_COUNT] =
        std::array::from_fn(|i| target_length(MAX_LENGTHS[i], verb.room_size()));

    for call in 1..=TAP_COUNT {
        verb.process_block_stereo_inplace(&mut left, &mut right);
        let lengths = verb.tap_lengths();
        for i in 0..TAP_COUNT {
            if i < call {
                assert_eq!(lengths[i], target[i], "tap {i} after {call} calls");
            } else {
                assert_ne!(lengths[i], target[i], "tap {i} reseeded early at call {call}");
            }
        }
        assert_eq!(verb.countdown(), TAP_COUNT - call);
        assert_cursors_in_bounds(&verb);
    }
    assert_eq!(verb.tap_lengths(), target);
}

#[test]
fn shrinking_mid_sweep_keeps_cursors_in_bounds() {
    let mut verb = PocketVerb::new();
    verb.set_size(1.0);
    let input = sine(BLOCK);
    let mut out_l = [0.0_f32; BLOCK];
    let mut out_r = [0.0_f32; BLOCK];
    for call in 0..200 {
        if call == 40 {
            verb.set_size(0.0);
        }
        if call == 50 {
            verb.set_size(0.6);
        }
        verb.process_block_stereo(&input, &input, &mut out_l, &mut out_r);
        assert_cursors_in_bounds(&verb);
        assert!(out_l.iter().chain(&out_r).all(|s| s.is_finite()));
    }
}

#[test]
fn size_change_mid_sweep_restarts_from_first_tap() {
    let mut verb = PocketVerb::new();
    for _ in 0..10 {
        verb.process_stereo(0.0, 0.0);
    }
    verb.set_size(0.2);
    verb.process_stereo(0.0, 0.0);
    assert_eq!(verb.countdown(), TAP_COUNT - 1);
    assert_eq!(verb.tap_lengths()[0], target_length(MAX_LENGTHS[0], verb.room_size()));
}

#[test]
fn extreme_controls_stay_finite() {
    for topology in Topology::ALL {
        for &(size, gate, mix) in &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (0.0, 1.0, 1.0), (1.0, 0.0, 0.0)] {
            let mut verb = PocketVerb::new();
            verb.set_controls(Controls::new(topology.control_value(), size, gate, mix));
            let mut left: Vec<f32> = (0..8000)
                .map(|i| match i % 3 {
                    0 => 1.0,
                    1 => -1.0,
                    _ => 0.0,
                })
                .collect();
            let mut right = left.clone();
            render(&mut verb, &mut left, &mut right, 512);
            assert!(
                left.iter().chain(&right).all(|s| s.is_finite()),
                "{topology} size={size} gate={gate} mix={mix}"
            );
        }
    }
}

#[test]
fn gate_closes_wet_path_after_silence() {
    let mut gated = PocketVerb::new();
    gated.set_controls(Controls::new(0.0, 0.5, 1.0, 1.0));
    let mut open = PocketVerb::new();
    open.set_controls(Controls::new(0.0, 0.5, 0.0, 1.0));

    let (mut gl, mut gr) = (sine(4000), sine(4000));
    let (mut ol, mut or) = (sine(4000), sine(4000));
    gl.extend(std::iter::repeat_n(0.0, 20_000));
    gr.extend(std::iter::repeat_n(0.0, 20_000));
    ol.extend(std::iter::repeat_n(0.0, 20_000));
    or.extend(std::iter::repeat_n(0.0, 20_000));

    render(&mut gated, &mut gl, &mut gr, BLOCK);
    render(&mut open, &mut ol, &mut or, BLOCK);

    // Release 0.00008 per sample closes the gate within 12500 samples
    let gated_tail = energy(&gl[18_000..]);
    let open_tail = energy(&ol[18_000..]);
    assert!(gated_tail < open_tail, "gated {gated_tail} vs open {open_tail}");
}

#[test]
fn parameters_drive_engine() {
    let mut verb = PocketVerb::new();
    let ty = verb.find_param_by_name("Type").unwrap_or(usize::MAX);
    let value = verb.parse_param(ty, "Stretch").unwrap_or_default();
    verb.set_param(ty, value);
    assert_eq!(verb.topology(), Topology::Stretch);
    assert_eq!(verb.format_param(ty, verb.get_param(ty)).as_deref(), Some("Stretch"));
}

#[test]
fn reset_matches_fresh_engine() {
    let controls = Controls::new(0.9, 0.3, 0.4, 0.7);
    let mut used = PocketVerb::new();
    used.set_controls(controls);
    let mut l = sine(3000);
    let mut r = sine(3000);
    render(&mut used, &mut l, &mut r, BLOCK);
    used.reset();

    let mut fresh = PocketVerb::new();
    fresh.set_controls(controls);

    let (mut a_l, mut a_r) = (sine(2000), sine(2000));
    let (mut b_l, mut b_r) = (sine(2000), sine(2000));
    render(&mut used, &mut a_l, &mut a_r, BLOCK);
    render(&mut fresh, &mut b_l, &mut b_r, BLOCK);
    assert_eq!(a_l, b_l);
    assert_eq!(a_r, b_r);
}

#[test]
fn zarathustra_feedback_spans_call_boundaries() {
    let mut settled = PocketVerb::new();
    settled.set_controls(Controls::new(Topology::Zarathustra.control_value(), 0.6, 0.0, 1.0));
    for _ in 0..TAP_COUNT {
        settled.process_stereo(0.0, 0.0);
    }
    assert!(!settled.is_reseeding());

    let mut input = sine(600);
    input.resize(3000, 0.0);

    let mut outputs = Vec::new();
    for block in [1, 97, input.len()] {
        let mut verb = settled.clone();
        let (mut left, mut right) = (input.clone(), input.clone());
        render(&mut verb, &mut left, &mut right, block);
        outputs.push((left, right));
    }
    for (left, right) in &outputs[1..] {
        assert_eq!(left, &outputs[0].0);
        assert_eq!(right, &outputs[0].1);
    }
}
