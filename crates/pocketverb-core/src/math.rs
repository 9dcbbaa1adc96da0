//! Small numeric helpers shared by the reverb stages.
//!
//! All functions are allocation-free and suitable for `no_std`.

/// Inputs with a magnitude below this are treated as denormal-prone silence.
pub const DENORMAL_THRESHOLD: f64 = 1.18e-23;

/// Scale applied to the dither state when replacing a denormal-prone input.
pub const DENORMAL_FILL_SCALE: f64 = 1.18e-17;

/// Clamp a normalized control into `[0, 1]`.
///
/// Non-finite input returns `None` so callers can keep their previous value.
///
/// # Example
/// ```rust
/// use pocketverb_core::pin_unit;
///
/// assert_eq!(pin_unit(1.5), Some(1.0));
/// assert_eq!(pin_unit(-0.2), Some(0.0));
/// assert_eq!(pin_unit(f32::NAN), None);
/// ```
#[inline]
pub fn pin_unit(value: f32) -> Option<f32> {
    if value.is_finite() {
        Some(value.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Sign of `x` as `-1.0`, `0.0` or `1.0`.
///
/// Unlike [`f64::signum`], zero maps to zero.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Linear wet/dry crossfade: `dry * (1 - mix) + wet * mix`.
///
/// # Example
/// ```rust
/// use pocketverb_core::wet_dry_mix;
///
/// assert_eq!(wet_dry_mix(1.0, 0.0, 0.0), 1.0);
/// assert_eq!(wet_dry_mix(1.0, 0.0, 1.0), 0.0);
/// assert_eq!(wet_dry_mix(1.0, 0.0, 0.25), 0.75);
/// ```
#[inline]
pub fn wet_dry_mix(dry: f64, wet: f64, mix: f64) -> f64 {
    dry * (1.0 - mix) + wet * mix
}
