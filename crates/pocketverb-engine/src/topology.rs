//! The six room topologies as static cross-feed tables.
//!
//! Every topology runs the same 26-tap inner pass followed by the same
//! 26-tap outer pass. What differs is, per tap and per pass, where the
//! averaging stage after each allpass draws its newest sample from
//! ([`Source`]), how many history slots it averages ([`Window`]), and how
//! the final output is assembled from the bank ([`OutputRule`]).
//!
//! | Room        | Window | Cross-feeds                               | Output      |
//! |-------------|--------|-------------------------------------------|-------------|
//! | Chamber     | 3      | `A` into E, J, O, T, Y / C, H, M, R, W     | chain       |
//! | Spring      | 3      | tap `k` from tap `25 - k`, both ways      | pair sum    |
//! | Tiled       | 2      | tap `k` from tap `k - 3`, sparse          | pair sum    |
//! | Room        | 2      | every tap fed the original dry sample     | room sum    |
//! | Stretch     | 2      | as Tiled                                  | chain       |
//! | Zarathustra | 3      | `A` averages with `Z` from the last sample | reinject    |

use crate::bank::TAP_COUNT;

/// Index of the mid-chain tap reinjected by [`OutputRule::Reinject`].
pub const REINJECT_TAP: usize = 12;

/// Number of history slots averaged after each allpass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Average of the two newest outputs.
    Two,
    /// Average of the three newest outputs.
    Three,
}

impl Window {
    /// Slot count.
    pub const fn slots(self) -> usize {
        match self {
            Window::Two => 2,
            Window::Three => 3,
        }
    }
}

/// Where an averaging stage takes its newest sample from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The tap's own history.
    Own,
    /// The newest history slot of another tap in the same pass. Taps later
    /// in the chain still hold the previous sample's value.
    Tap(u8),
    /// Own newest two slots plus the oldest slot of the last tap, closing a
    /// loop around the whole chain.
    Feedback,
    /// Like [`Own`](Self::Own), but the allpass is fed the original dry
    /// sample, before saturation, instead of the previous tap's output.
    Dry,
}

/// How the pass output becomes the network output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputRule {
    /// The last tap's averaged value.
    Chain,
    /// Sum of the last tap's two newest outer outputs.
    PairSum,
    /// Weighted sum of every tap's inner and outer newest outputs.
    RoomSum,
    /// Average of the mid-chain inner output and the last tap's two newest
    /// outer outputs.
    Reinject,
}

/// One topology's full table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// Averaging window shared by every stage.
    pub window: Window,
    /// Sources for the inner pass, indexed by tap.
    pub inner: [Source; TAP_COUNT],
    /// Sources for the outer pass, indexed by tap.
    pub outer: [Source; TAP_COUNT],
    /// Final output rule.
    pub output: OutputRule,
}

const fn uniform(source: Source) -> [Source; TAP_COUNT] {
    [source; TAP_COUNT]
}

/// Feed tap `A` into every tap whose index is `offset` mod 5.
const fn every_fifth_from_a(offset: usize) -> [Source; TAP_COUNT] {
    let mut table = uniform(Source::Own);
    let mut i = 0;
    while i < TAP_COUNT {
        if i % 5 == offset && i != 0 {
            table[i] = Source::Tap(0);
        }
        i += 1;
    }
    table
}

/// Every tap `k` reads tap `25 - k`, so each pair feeds both ways.
const fn mirrored_pairs() -> [Source; TAP_COUNT] {
    let mut table = uniform(Source::Own);
    let mut i = 0;
    while i < TAP_COUNT {
        table[i] = Source::Tap((TAP_COUNT - 1 - i) as u8);
        i += 1;
    }
    table
}

const fn three_back(at: [usize; 3]) -> [Source; TAP_COUNT] {
    let mut table = uniform(Source::Own);
    let mut k = 0;
    while k < at.len() {
        table[at[k]] = Source::Tap((at[k] - 3) as u8);
        k += 1;
    }
    table
}

const fn loop_from_last() -> [Source; TAP_COUNT] {
    let mut table = uniform(Source::Own);
    table[0] = Source::Feedback;
    table
}

static CHAMBER: Recipe = Recipe {
    window: Window::Three,
    inner: every_fifth_from_a(4),
    outer: every_fifth_from_a(2),
    output: OutputRule::Chain,
};

static SPRING: Recipe = Recipe {
    window: Window::Three,
    inner: mirrored_pairs(),
    outer: mirrored_pairs(),
    output: OutputRule::PairSum,
};

static TILED: Recipe = Recipe {
    window: Window::Two,
    inner: three_back([7, 15, 23]),
    outer: three_back([3, 11, 19]),
    output: OutputRule::PairSum,
};

static ROOM: Recipe = Recipe {
    window: Window::Two,
    inner: uniform(Source::Dry),
    outer: uniform(Source::Dry),
    output: OutputRule::RoomSum,
};

static STRETCH: Recipe = Recipe {
    window: Window::Two,
    inner: three_back([7, 15, 23]),
    outer: three_back([3, 11, 19]),
    output: OutputRule::Chain,
};

static ZARATHUSTRA: Recipe = Recipe {
    window: Window::Three,
    inner: loop_from_last(),
    outer: loop_from_last(),
    output: OutputRule::Reinject,
};

/// Reverb character selected by the Type control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Dense chamber with periodic reinjection of the first tap.
    #[default]
    Chamber,
    /// Mirrored cross-feeds with a bright, springy decay.
    Spring,
    /// Sparse two-sample averaging.
    Tiled,
    /// Every tap fed the input directly; short and even.
    Room,
    /// Tiled without the doubled output.
    Stretch,
    /// Whole-chain feedback loop.
    Zarathustra,
}

impl Topology {
    /// All topologies in control order.
    pub const ALL: [Topology; 6] = [
        Topology::Chamber,
        Topology::Spring,
        Topology::Tiled,
        Topology::Room,
        Topology::Stretch,
        Topology::Zarathustra,
    ];

    /// Map the normalized Type control: `floor(a × 5.999) + 1`, clamped to 1..=6.
    pub fn from_control(value: f32) -> Self {
        let index = libm::floor(f64::from(value) * 5.999) as i64;
        Self::ALL[index.clamp(0, 5) as usize]
    }

    /// Look up by 1-based type number.
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Look up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// 1-based type number.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based display index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Topology::Chamber => "Chamber",
            Topology::Spring => "Spring",
            Topology::Tiled => "Tiled",
            Topology::Room => "Room",
            Topology::Stretch => "Stretch",
            Topology::Zarathustra => "Zarathustra",
        }
    }

    /// A normalized Type value that selects this topology.
    pub fn control_value(self) -> f32 {
        self.index() as f32 / 5.0
    }

    /// The static table for this topology.
    pub fn recipe(self) -> &'static Recipe {
        match self {
            Topology::Chamber => &CHAMBER,
            Topology::Spring => &SPRING,
            Topology::Tiled => &TILED,
            Topology::Room => &ROOM,
            Topology::Stretch => &STRETCH,
            Topology::Zarathustra => &ZARATHUSTRA,
        }
    }
}

impl core::fmt::Display for Topology {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_mapping() {
        assert_eq!(Topology::from_control(0.0), Topology::Chamber);
        assert_eq!(Topology::from_control(0.17), Topology::Spring);
        assert_eq!(Topology::from_control(0.5), Topology::Tiled);
        assert_eq!(Topology::from_control(0.6), Topology::Room);
        assert_eq!(Topology::from_control(1.0), Topology::Zarathustra);
        assert_eq!(Topology::from_control(-3.0), Topology::Chamber);
        assert_eq!(Topology::from_control(7.0), Topology::Zarathustra);
    }

    #[test]
    fn test_control_value_round_trip() {
        for t in Topology::ALL {
            assert_eq!(Topology::from_control(t.control_value()), t);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Topology::from_name("spring"), Some(Topology::Spring));
        assert_eq!(Topology::from_name(" ZARATHUSTRA "), Some(Topology::Zarathustra));
        assert_eq!(Topology::from_name("hall"), None);
        assert_eq!(Topology::Tiled.to_string(), "Tiled");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(Topology::from_number(1), Some(Topology::Chamber));
        assert_eq!(Topology::from_number(6), Some(Topology::Zarathustra));
        assert_eq!(Topology::from_number(0), None);
        assert_eq!(Topology::from_number(7), None);
        assert_eq!(Topology::Stretch.number(), 5);
    }

    #[test]
    fn test_chamber_table() {
        let r = Topology::Chamber.recipe();
        for i in [4, 9, 14, 19, 24] {
            assert_eq!(r.inner[i], Source::Tap(0));
        }
        for i in [2, 7, 12, 17, 22] {
            assert_eq!(r.outer[i], Source::Tap(0));
        }
        assert_eq!(r.inner[0], Source::Own);
        assert_eq!(r.inner.iter().filter(|s| **s != Source::Own).count(), 5);
    }

    #[test]
    fn test_spring_pairs_mirror() {
        let r = Topology::Spring.recipe();
        for k in 0..TAP_COUNT {
            let partner = TAP_COUNT - 1 - k;
            assert_eq!(r.inner[k], Source::Tap(partner as u8), "tap {k}");
            assert_eq!(r.inner[partner], Source::Tap(k as u8), "tap {partner}");
        }
        assert_eq!(r.inner[1], Source::Tap(24));
        assert_eq!(r.inner[24], Source::Tap(1));
        assert_eq!(r.inner, r.outer);
    }

    #[test]
    fn test_tiled_and_stretch_share_tables() {
        let tiled = Topology::Tiled.recipe();
        let stretch = Topology::Stretch.recipe();
        assert_eq!(tiled.inner, stretch.inner);
        assert_eq!(tiled.outer, stretch.outer);
        assert_eq!(tiled.inner[7], Source::Tap(4));
        assert_eq!(tiled.outer[3], Source::Tap(0));
        assert_ne!(tiled.output, stretch.output);
    }

    #[test]
    fn test_zarathustra_loop() {
        let r = Topology::Zarathustra.recipe();
        assert_eq!(r.inner[0], Source::Feedback);
        assert!(r.inner[1..].iter().all(|s| *s == Source::Own));
        assert_eq!(r.window.slots(), 3);
    }
}
