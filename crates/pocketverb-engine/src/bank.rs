//! The 26-tap bank one channel runs each sample through.
//!
//! A pass feeds the sample through taps `A..=Z` in order. After each
//! allpass the tap's history is averaged according to the active
//! [`Recipe`], and that average becomes the next tap's input.

use pocketverb_core::{Pass, Tap};

use crate::topology::{OutputRule, REINJECT_TAP, Recipe, Source, Window};

/// Number of taps per bank.
pub const TAP_COUNT: usize = 26;

/// Maximum active length of each tap, `A` first.
pub const MAX_LENGTHS: [usize; TAP_COUNT] = [
    7573, 7307, 7177, 6907, 6779, 6521, 5981, 5563, 5297, 4903, 4759, 4489, 4391, 4229, 4153,
    3989, 3659, 3407, 3251, 2999, 2917, 2749, 2503, 2423, 2146, 2088,
];

const LAST: usize = TAP_COUNT - 1;

/// One channel's taps.
#[derive(Debug, Clone)]
pub struct TapBank {
    taps: [Tap; TAP_COUNT],
}

impl TapBank {
    /// Allocate every tap at its maximum length.
    pub fn new() -> Self {
        Self {
            taps: core::array::from_fn(|i| Tap::new(char::from(b'A' + i as u8), MAX_LENGTHS[i])),
        }
    }

    /// All taps, `A` first.
    pub fn taps(&self) -> &[Tap; TAP_COUNT] {
        &self.taps
    }

    /// Active length of every tap.
    pub fn lengths(&self) -> [usize; TAP_COUNT] {
        core::array::from_fn(|i| self.taps[i].len())
    }

    /// Install a new active length on one tap.
    pub fn set_tap_len(&mut self, index: usize, len: usize) {
        self.taps[index].set_len(len);
    }

    /// Clear every tap back to its initial state.
    pub fn clear(&mut self) {
        for tap in &mut self.taps {
            tap.clear();
        }
    }

    /// Run both passes and the output rule for one sample.
    ///
    /// `input` is the saturated network input and `dry` the original
    /// sample fed to [`Source::Dry`] taps; `wet` weights the
    /// [`OutputRule::RoomSum`] end taps.
    #[inline]
    pub fn process(&mut self, recipe: &Recipe, input: f64, dry: f64, wet: f64) -> f64 {
        let inner = self.run_pass(recipe, Pass::Inner, input, dry);
        let chain = self.run_pass(recipe, Pass::Outer, inner, dry);
        self.output(recipe.output, chain, wet)
    }

    fn run_pass(&mut self, recipe: &Recipe, pass: Pass, input: f64, dry: f64) -> f64 {
        let sources = match pass {
            Pass::Inner => &recipe.inner,
            Pass::Outer => &recipe.outer,
        };
        let mut x = input;
        for (i, &source) in sources.iter().enumerate() {
            let tap_input = if source == Source::Dry { dry } else { x };
            self.taps[i].process(pass, tap_input);
            x = self.stage(recipe.window, source, i, pass);
        }
        x
    }

    /// Average tap `i`'s history, substituting the newest slot per `source`.
    #[inline]
    fn stage(&self, window: Window, source: Source, i: usize, pass: Pass) -> f64 {
        let own = self.taps[i].history(pass);
        match (window, source) {
            (Window::Three, Source::Own | Source::Dry) => (own[0] + own[1] + own[2]) / 3.0,
            (Window::Three, Source::Tap(k)) => {
                let head = self.taps[usize::from(k)].history(pass)[0];
                (head + own[1] + own[2]) / 3.0
            }
            (Window::Three, Source::Feedback) => {
                let tail = self.taps[LAST].history(pass)[2];
                (own[0] + own[1] + tail) / 3.0
            }
            (Window::Two, Source::Own | Source::Dry) => (own[0] + own[1]) / 2.0,
            (Window::Two, Source::Tap(k)) => {
                let head = self.taps[usize::from(k)].history(pass)[0];
                (head + own[1]) / 2.0
            }
            (Window::Two, Source::Feedback) => {
                let tail = self.taps[LAST].history(pass)[2];
                (own[0] + tail) / 2.0
            }
        }
    }

    fn output(&self, rule: OutputRule, chain: f64, wet: f64) -> f64 {
        let last = self.taps[LAST].history(Pass::Outer);
        match rule {
            OutputRule::Chain => chain,
            OutputRule::PairSum => last[0] + last[1],
            OutputRule::RoomSum => {
                let dryness = 1.0 - wet;
                let sum: f64 = self
                    .taps
                    .iter()
                    .enumerate()
                    .map(|(i, tap)| {
                        let v = (tap.history(Pass::Inner)[0] + tap.history(Pass::Outer)[0]) / 2.0;
                        let weight = match i {
                            0 | 1 => dryness,
                            LAST => wet,
                            _ => 1.0,
                        };
                        v * weight
                    })
                    .sum();
                sum / (TAP_COUNT as f64 + 4.0 * wet)
            }
            OutputRule::Reinject => {
                let mid = self.taps[REINJECT_TAP].history(Pass::Inner)[0];
                (mid + last[0] + last[1]) / 3.0
            }
        }
    }
}

impl Default for TapBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;
    use pocketverb_core::ALLPASS_FEEDBACK;

    #[test]
    fn test_names_and_capacities() {
        let bank = TapBank::new();
        assert_eq!(bank.taps()[0].name(), 'A');
        assert_eq!(bank.taps()[25].name(), 'Z');
        assert!(MAX_LENGTHS.windows(2).all(|w| w[0] > w[1]));
        for (tap, &max) in bank.taps().iter().zip(&MAX_LENGTHS) {
            assert_eq!(tap.max_len(), max);
            assert_eq!(tap.len(), 4);
        }
    }

    #[test]
    fn test_silence_stays_silent() {
        for topology in Topology::ALL {
            let mut bank = TapBank::new();
            for _ in 0..100 {
                assert_eq!(bank.process(topology.recipe(), 0.0, 0.0, 0.5), 0.0);
            }
        }
    }

    #[test]
    fn test_every_topology_finite_and_bounded() {
        for topology in Topology::ALL {
            let mut bank = TapBank::new();
            for (i, &len) in MAX_LENGTHS.iter().enumerate() {
                bank.set_tap_len(i, len / 3);
            }
            for n in 0..5000 {
                let x = if n % 97 == 0 { 1.0 } else { 0.0 };
                let y = bank.process(topology.recipe(), x, x, 1.0);
                assert!(y.is_finite() && y.abs() < 100.0, "{topology}: {y} at {n}");
            }
        }
    }

    #[test]
    fn test_room_taps_fed_dry_sample() {
        let mut bank = TapBank::new();
        bank.process(Topology::Room.recipe(), 0.9, 0.5, 0.0);
        // A fresh ring outputs g times its input
        let expected = ALLPASS_FEEDBACK * 0.5;
        for tap in bank.taps() {
            assert!((tap.history(Pass::Inner)[0] - expected).abs() < 1e-15, "{}", tap.name());
            assert!((tap.history(Pass::Outer)[0] - expected).abs() < 1e-15, "{}", tap.name());
        }
    }

    #[test]
    fn test_room_sum_weights_end_taps() {
        let recipe = Topology::Room.recipe();
        for wet in [0.0, 0.3, 1.0] {
            let mut bank = TapBank::new();
            for n in 0..40 {
                let x = if n % 7 == 0 { 0.8 } else { -0.1 };
                bank.process(recipe, x, x, wet);
            }
            let y = bank.process(recipe, 0.2, 0.2, wet);

            let taps = bank.taps();
            let v: [f64; TAP_COUNT] = core::array::from_fn(|i| {
                (taps[i].history(Pass::Inner)[0] + taps[i].history(Pass::Outer)[0]) / 2.0
            });
            let middle: f64 = v[2..LAST].iter().sum();
            let expected = ((v[0] + v[1]) * (1.0 - wet) + middle + v[LAST] * wet)
                / (26.0 + 4.0 * wet);
            assert!((y - expected).abs() < 1e-12, "wet {wet}: {y} vs {expected}");
        }
    }

    #[test]
    fn test_fresh_room_sum_normalization() {
        // All 26 taps hold g * dry after one sample
        let v = ALLPASS_FEEDBACK * 0.5;
        for wet in [0.0, 0.25, 1.0] {
            let mut bank = TapBank::new();
            let y = bank.process(Topology::Room.recipe(), 0.7, 0.5, wet);
            let expected = v * (25.0 - wet) / (26.0 + 4.0 * wet);
            assert!((y - expected).abs() < 1e-12, "wet {wet}: {y} vs {expected}");
        }
    }

    #[test]
    fn test_set_len_and_clear() {
        let mut bank = TapBank::new();
        bank.set_tap_len(3, 1000);
        assert_eq!(bank.lengths()[3], 1000);
        bank.process(Topology::Chamber.recipe(), 0.5, 0.5, 0.5);
        bank.clear();
        assert_eq!(bank.lengths(), [4; TAP_COUNT]);
        assert_eq!(bank.process(Topology::Chamber.recipe(), 0.0, 0.0, 0.5), 0.0);
    }
}
