//! Property-based tests for the reverb engine.
//!
//! Uses proptest to check determinism, finite bounded output for any
//! control setting and block partitioning, and the tap cursor invariant
//! under arbitrary size automation.

use pocketverb_core::{Effect, Pass};
use pocketverb_engine::{Controls, PocketVerb, near_prime, scheduler::has_small_divisor};
use proptest::prelude::*;

fn controls_strategy() -> impl Strategy<Value = Controls> {
    (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0)
        .prop_map(|(a, b, c, d)| Controls::new(a, b, c, d))
}

fn render_in_blocks(verb: &mut PocketVerb, input: &[f32], block: usize) -> (Vec<f32>, Vec<f32>) {
    let mut left = input.to_vec();
    let mut right: Vec<f32> = input.iter().map(|x| -x).collect();
    for (l, r) in left.chunks_mut(block).zip(right.chunks_mut(block)) {
        verb.process_block_stereo_inplace(l, r);
    }
    (left, right)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Same seed, controls and input give bit-identical output.
    #[test]
    fn fresh_engines_are_deterministic(
        controls in controls_strategy(),
        seed in any::<u32>(),
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..600),
        block in 1usize..128,
    ) {
        let mut a = PocketVerb::with_seed(seed);
        let mut b = PocketVerb::with_seed(seed);
        a.set_controls(controls);
        b.set_controls(controls);
        let out_a = render_in_blocks(&mut a, &input, block);
        let out_b = render_in_blocks(&mut b, &input, block);
        prop_assert_eq!(out_a, out_b);
    }

    /// Any controls and block size keep full-scale input finite and bounded.
    #[test]
    fn output_finite_and_bounded(
        controls in controls_strategy(),
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..2000),
        block in 1usize..512,
    ) {
        let mut verb = PocketVerb::new();
        verb.set_controls(controls);
        let (left, right) = render_in_blocks(&mut verb, &input, block);
        for s in left.iter().chain(&right) {
            prop_assert!(s.is_finite());
            prop_assert!(s.abs() < 100.0, "sample {}", s);
        }
    }

    /// Cursors never leave `[0, len]` while sizes change mid-sweep.
    #[test]
    fn cursors_stay_in_bounds_under_automation(
        sizes in prop::collection::vec(0.0f32..=1.0f32, 1..12),
        calls_per_size in 1usize..40,
    ) {
        let mut verb = PocketVerb::new();
        let mut left = [0.25_f32; 16];
        let mut right = [-0.25_f32; 16];
        for size in sizes {
            verb.set_size(size);
            for _ in 0..calls_per_size {
                verb.process_block_stereo_inplace(&mut left, &mut right);
                for bank in [verb.left_bank(), verb.right_bank()] {
                    for tap in bank.taps() {
                        prop_assert!(tap.cursor(Pass::Inner) <= tap.len());
                        prop_assert!(tap.cursor(Pass::Outer) <= tap.len());
                        prop_assert!(tap.len() <= tap.max_len());
                    }
                }
            }
        }
    }

    /// Near-prime results either have no small divisor or hit the cap.
    #[test]
    fn near_prime_avoids_small_divisors(n in 71usize..10_000, headroom in 0usize..500) {
        let max = n + headroom;
        let p = near_prime(n, max);
        prop_assert!(p >= n && p <= max);
        prop_assert!(p == max || !has_small_divisor(p));
    }
}
