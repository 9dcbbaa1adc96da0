//! Parameter introspection for host-facing controls.
//!
//! This module provides the [`ParameterInfo`] trait and the types that
//! describe each parameter. Every parameter lives in normalized `[0, 1]`
//! space; the descriptor carries how to present it:
//!
//! - [`ParamId`] - stable numeric ID for automation and saved settings
//! - [`ParamUnit`] - display unit (percent, or a named choice list)
//! - [`ParamFlags`] - capability flags (automatable, stepped)
//! - `string_id` - human-readable stable ID for config files
//!
//! # Example
//!
//! ```rust
//! use pocketverb_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Level {
//!     level: f32,
//! }
//!
//! impl ParameterInfo for Level {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::percent("Level", "Level", 0.5)
//!                 .with_id(ParamId(10), "level")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.level } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.level = value.clamp(0.0, 1.0);
//!         }
//!     }
//! }
//!
//! let level = Level { level: 0.25 };
//! assert_eq!(level.format_param(0, 0.25).as_deref(), Some("25.0%"));
//! assert_eq!(level.parse_param(0, "80"), Some(0.8));
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags. Use [`union`](Self::union) to combine.
///
/// # Example
///
/// ```rust
/// use pocketverb_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter selects among discrete choices.
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit used to display a normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Shown as `value × 100` with a `%` suffix.
    Percent,
    /// Shown by the name of the choice the value selects.
    Choice,
}

impl ParamUnit {
    /// Unit suffix appended to formatted values.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Percent => "%",
            ParamUnit::Choice => "",
        }
    }
}

/// Metadata for one normalized parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name.
    pub name: &'static str,
    /// Short name, at most 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Default normalized value.
    pub default: f32,
    /// Normalized step for encoder-style control.
    pub step: f32,
    /// Number of discrete choices for [`ParamUnit::Choice`] parameters, else 0.
    pub choices: u8,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Stable string ID for config files.
    pub string_id: &'static str,
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// A continuous parameter displayed as a percentage.
    pub const fn percent(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            default,
            step: 0.01,
            choices: 0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// A stepped parameter selecting one of `choices` named options.
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        choices: u8,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Choice,
            default,
            step: 1.0 / choices as f32,
            choices,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Set the stable IDs.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamp a value into `[0, 1]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(0.0, 1.0)
    }
}

/// Trait for engines that expose introspectable parameters.
pub trait ParameterInfo {
    /// Number of parameters; valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current normalized value. Returns `0.0` for an out-of-range index.
    fn get_param(&self, index: usize) -> f32;

    /// Set a normalized value. Out-of-range indices are ignored and values
    /// are clamped to `[0, 1]`.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name or short name (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Stable [`ParamId`] of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Index of the parameter with the given [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }

    /// Display text for `value` on parameter `index`.
    ///
    /// The default shows percentages with one decimal. Implementations with
    /// [`ParamUnit::Choice`] parameters override this to print choice names.
    fn format_param(&self, index: usize, value: f32) -> Option<String> {
        self.param_info(index)?;
        Some(format_percent(value))
    }

    /// Parse display text into a normalized value.
    ///
    /// The default reads a percentage (`"50"` or `"50%"` → `0.5`) and clamps
    /// the result. Returns `None` for unparseable text or an unknown index.
    fn parse_param(&self, index: usize, text: &str) -> Option<f32> {
        self.param_info(index)?;
        parse_percent(text)
    }
}

/// Format a normalized value as a percentage with one decimal (`0.5` → `"50.0%"`).
pub fn format_percent(value: f32) -> String {
    format!("{:.1}{}", value * 100.0, ParamUnit::Percent.suffix())
}

/// Parse a percentage (`"50"` or `"50%"`) into a normalized value in `[0, 1]`.
///
/// Returns `None` for unparseable or non-finite text.
pub fn parse_percent(text: &str) -> Option<f32> {
    let number = text.trim().trim_end_matches('%').trim_end();
    let value: f32 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some((value / 100.0).clamp(0.0, 1.0))
}
