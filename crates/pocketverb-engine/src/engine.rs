//! The stereo reverb engine.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::string::{String, ToString};

use pocketverb_core::{
    DEFAULT_SEED, Ditherer, Effect, ParamDescriptor, ParamId, ParameterInfo, PeakFollower,
    Saturator, common_len, format_percent, gated_wetness, parse_percent, wet_dry_mix,
};

use crate::bank::{MAX_LENGTHS, TAP_COUNT, TapBank};
use crate::controls::{CONTROL_COUNT, Controls, GATE, MIX, SIZE, TYPE};
use crate::scheduler::{LengthScheduler, target_length};
use crate::topology::{Recipe, Topology};

/// One channel's bank and wetness gate.
#[derive(Debug, Clone)]
struct Channel {
    bank: TapBank,
    envelope: PeakFollower,
}

impl Channel {
    fn new() -> Self {
        Self {
            bank: TapBank::new(),
            envelope: PeakFollower::new(),
        }
    }

    #[inline]
    fn process(&mut self, recipe: &Recipe, saturator: &Saturator, x: f64, wet: f64) -> f64 {
        let dry = x;
        let effective = gated_wetness(wet, self.envelope.process(dry));
        let diffused = self.bank.process(recipe, saturator.forward(x), dry, wet);
        wet_dry_mix(dry, saturator.inverse(diffused), effective)
    }

    fn reset(&mut self) {
        self.bank.clear();
        self.envelope.reset();
    }
}

/// Six-topology allpass diffusion reverb.
///
/// Samples enter and leave as `f32`; everything in between runs in `f64`.
/// Each processing call (one block, or one [`process_stereo`] frame)
/// re-seeds at most one tap after a Size change, so a new size takes effect
/// over 26 calls.
///
/// [`process_stereo`]: Effect::process_stereo
///
/// # Parameters
///
/// | Index | Name | Display |
/// |-------|------|---------|
/// | 0 | Type | room name |
/// | 1 | Size | percent |
/// | 2 | Gate | percent |
/// | 3 | Mix | percent |
///
/// # Example
///
/// ```rust
/// use pocketverb_core::Effect;
/// use pocketverb_engine::{PocketVerb, Topology};
///
/// let mut verb = PocketVerb::new();
/// verb.set_topology(Topology::Spring);
/// verb.set_mix(1.0);
///
/// let mut left = vec![0.0_f32; 256];
/// let mut right = vec![0.0_f32; 256];
/// left[0] = 1.0;
/// right[0] = 1.0;
/// verb.process_block_stereo_inplace(&mut left, &mut right);
/// assert!(left.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct PocketVerb {
    controls: Controls,
    topology: Topology,
    saturator: Saturator,
    left: Channel,
    right: Channel,
    scheduler: LengthScheduler,
    ditherer: Ditherer,
}

impl PocketVerb {
    /// Engine with default controls and the default dither seed.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Engine with default controls and the given dither seed.
    pub fn with_seed(seed: u32) -> Self {
        let controls = Controls::DEFAULT;
        let mut verb = Self {
            controls,
            topology: controls.topology(),
            saturator: Saturator::from_wet(controls.wet()),
            left: Channel::new(),
            right: Channel::new(),
            scheduler: LengthScheduler::new(),
            ditherer: Ditherer::new(seed),
        };
        verb.sync_derived();
        verb
    }

    /// Current controls.
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Replace all four controls. Non-finite values are ignored.
    pub fn set_controls(&mut self, controls: Controls) {
        for index in 0..CONTROL_COUNT {
            self.controls.set(index, controls.get(index));
        }
        self.sync_derived();
    }

    /// Set the Type control (normalized).
    pub fn set_room_type(&mut self, value: f32) {
        self.set_control(TYPE, value);
    }

    /// Select a topology directly.
    pub fn set_topology(&mut self, topology: Topology) {
        self.set_control(TYPE, topology.control_value());
    }

    /// Set the Size control (normalized).
    pub fn set_size(&mut self, value: f32) {
        self.set_control(SIZE, value);
    }

    /// Set the Gate control (normalized).
    pub fn set_gate(&mut self, value: f32) {
        self.set_control(GATE, value);
    }

    /// Set the Mix control (normalized).
    pub fn set_mix(&mut self, value: f32) {
        self.set_control(MIX, value);
    }

    /// Active topology.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Room-size fraction derived from Size.
    pub fn room_size(&self) -> f64 {
        self.controls.room_size()
    }

    /// Taps still waiting for their new length.
    pub fn countdown(&self) -> usize {
        self.scheduler.countdown()
    }

    /// Whether a length sweep is in progress.
    pub fn is_reseeding(&self) -> bool {
        self.scheduler.is_reseeding()
    }

    /// Active tap lengths of the left bank (both banks always match).
    pub fn tap_lengths(&self) -> [usize; TAP_COUNT] {
        self.left.bank.lengths()
    }

    /// Left channel tap bank.
    pub fn left_bank(&self) -> &TapBank {
        &self.left.bank
    }

    /// Right channel tap bank.
    pub fn right_bank(&self) -> &TapBank {
        &self.right.bank
    }

    /// Enable or disable output dither.
    pub fn set_dither_enabled(&mut self, enabled: bool) {
        self.ditherer.set_enabled(enabled);
    }

    /// Whether output dither is applied.
    pub fn dither_enabled(&self) -> bool {
        self.ditherer.is_enabled()
    }

    fn set_control(&mut self, index: usize, value: f32) {
        if self.controls.set(index, value) {
            self.sync_derived();
        }
    }

    fn sync_derived(&mut self) {
        let topology = self.controls.topology();
        if topology != self.topology {
            #[cfg(feature = "tracing")]
            tracing::debug!("topology: {} -> {}", self.topology, topology);
            self.topology = topology;
        }
        self.saturator = Saturator::from_wet(self.controls.wet());
        let release = self.controls.release();
        self.left.envelope.set_release(release);
        self.right.envelope.set_release(release);
    }

    /// Per-call work: re-seed the next pending tap on both channels.
    fn begin_call(&mut self) {
        let room_size = self.controls.room_size();
        if let Some(index) = self.scheduler.begin_call(room_size) {
            let len = target_length(MAX_LENGTHS[index], room_size);
            self.left.bank.set_tap_len(index, len);
            self.right.bank.set_tap_len(index, len);
        }
    }

    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        let l = self.ditherer.guard(f64::from(left));
        let r = self.ditherer.guard(f64::from(right));

        let recipe = self.topology.recipe();
        let wet = self.controls.wet();
        let l = self.left.process(recipe, &self.saturator, l, wet);
        let r = self.right.process(recipe, &self.saturator, r, wet);

        let l = self.ditherer.apply(l);
        let r = self.ditherer.apply(r);
        (l as f32, r as f32)
    }
}

impl Default for PocketVerb {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for PocketVerb {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        self.begin_call();
        self.process_frame(left, right)
    }

    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        debug_assert_eq!(left_in.len(), right_in.len(), "channel length mismatch");
        debug_assert!(
            left_out.len() >= left_in.len() && right_out.len() >= right_in.len(),
            "output buffers shorter than input"
        );
        self.begin_call();
        let frames = common_len(&[
            left_in.len(),
            right_in.len(),
            left_out.len(),
            right_out.len(),
        ]);
        for i in 0..frames {
            (left_out[i], right_out[i]) = self.process_frame(left_in[i], right_in[i]);
        }
    }

    fn process_block_stereo_inplace(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len(), "channel length mismatch");
        self.begin_call();
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = self.process_frame(*l, *r);
        }
    }

    fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.scheduler.rearm();
        self.ditherer.reset();
    }
}

impl ParameterInfo for PocketVerb {
    fn param_count(&self) -> usize {
        CONTROL_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        let defaults = Controls::DEFAULT;
        match index {
            TYPE => Some(
                ParamDescriptor::choice("Type", "Type", Topology::ALL.len() as u8, defaults.room_type)
                    .with_id(ParamId(2000), "type"),
            ),
            SIZE => Some(
                ParamDescriptor::percent("Size", "Size", defaults.size)
                    .with_id(ParamId(2001), "size"),
            ),
            GATE => Some(
                ParamDescriptor::percent("Gate", "Gate", defaults.gate)
                    .with_id(ParamId(2002), "gate"),
            ),
            MIX => Some(
                ParamDescriptor::percent("Mix", "Mix", defaults.mix).with_id(ParamId(2003), "mix"),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        self.controls.get(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.set_control(index, value);
    }

    fn format_param(&self, index: usize, value: f32) -> Option<String> {
        match index {
            TYPE => Some(Topology::from_control(value).name().to_string()),
            SIZE | GATE | MIX => Some(format_percent(value)),
            _ => None,
        }
    }

    fn parse_param(&self, index: usize, text: &str) -> Option<f32> {
        match index {
            TYPE => Topology::from_name(text)
                .map(Topology::control_value)
                .or_else(|| parse_percent(text)),
            SIZE | GATE | MIX => parse_percent(text),
            _ => None,
        }
    }
}
