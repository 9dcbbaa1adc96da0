//! The four normalized host controls and their derived engine values.

use pocketverb_core::pin_unit;

use crate::topology::Topology;

/// Index of the Type control.
pub const TYPE: usize = 0;
/// Index of the Size control.
pub const SIZE: usize = 1;
/// Index of the Gate control.
pub const GATE: usize = 2;
/// Index of the Mix control.
pub const MIX: usize = 3;

/// Number of controls.
pub const CONTROL_COUNT: usize = 4;

/// Normalized control values, each in `[0, 1]`.
///
/// | Control | Derived value |
/// |---------|---------------|
/// | `room_type` | topology `floor(a × 5.999) + 1` |
/// | `size` | room size `b² × 1.9 + 0.1` |
/// | `gate` | release `0.00008 × c³` |
/// | `mix` | wet target, used directly |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Type (A).
    pub room_type: f32,
    /// Size (B).
    pub size: f32,
    /// Gate (C).
    pub gate: f32,
    /// Mix (D).
    pub mix: f32,
}

impl Controls {
    /// Factory defaults: Chamber, half size, gate off, half wet.
    pub const DEFAULT: Self = Self {
        room_type: 0.0,
        size: 0.5,
        gate: 0.0,
        mix: 0.5,
    };

    /// Build with every value pinned into `[0, 1]`. Non-finite values fall
    /// back to the default for that control.
    pub fn new(room_type: f32, size: f32, gate: f32, mix: f32) -> Self {
        let mut controls = Self::DEFAULT;
        controls.set(TYPE, room_type);
        controls.set(SIZE, size);
        controls.set(GATE, gate);
        controls.set(MIX, mix);
        controls
    }

    /// Value by index, `0.0` for an unknown index.
    pub fn get(&self, index: usize) -> f32 {
        match index {
            TYPE => self.room_type,
            SIZE => self.size,
            GATE => self.gate,
            MIX => self.mix,
            _ => 0.0,
        }
    }

    /// Pin and store a value by index.
    ///
    /// Returns `false` (leaving the control unchanged) for an unknown index
    /// or a non-finite value.
    pub fn set(&mut self, index: usize, value: f32) -> bool {
        let Some(value) = pin_unit(value) else {
            return false;
        };
        let slot = match index {
            TYPE => &mut self.room_type,
            SIZE => &mut self.size,
            GATE => &mut self.gate,
            MIX => &mut self.mix,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Selected topology.
    pub fn topology(&self) -> Topology {
        Topology::from_control(self.room_type)
    }

    /// Room-size fraction in `[0.1, 2.0]`.
    pub fn room_size(&self) -> f64 {
        let b = f64::from(self.size);
        b * b * 1.9 + 0.1
    }

    /// Per-sample linear release of the wetness gate.
    pub fn release(&self) -> f64 {
        let c = f64::from(self.gate);
        0.00008 * c * c * c
    }

    /// Wet target.
    pub fn wet(&self) -> f64 {
        f64::from(self.mix)
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::DEFAULT
    }
}
