//! Small DSP helpers shared across the analyser.
//!
//! - [`linear_to_db_floor`] - Magnitude to dB with a silence floor
//! - [`hz_to_omega`] - Frequency to angular frequency
//! - [`ms_to_samples`] - Time conversion
//! - [`mono_sum`] - Stereo downmix
//! - [`flush_denormal`] - Subnormal guard for recursive state

use libm::log10f;

/// Convert a linear magnitude to decibels, mapping silence to `floor_db`.
///
/// `20·log10(linear)` when `linear > 0`, otherwise `floor_db`. Never returns
/// −inf or NaN for zero, negative, or NaN input.
///
/// # Example
/// ```rust
/// use cortix_core::linear_to_db_floor;
///
/// assert!((linear_to_db_floor(1.0, -100.0)).abs() < 1e-6);
/// assert!((linear_to_db_floor(0.1, -100.0) + 20.0).abs() < 1e-4);
/// assert_eq!(linear_to_db_floor(0.0, -100.0), -100.0);
/// ```
#[inline]
pub fn linear_to_db_floor(linear: f32, floor_db: f32) -> f32 {
    if linear > 0.0 {
        20.0 * log10f(linear)
    } else {
        floor_db
    }
}

/// Convert frequency in Hz to angular frequency (radians/sample).
#[inline]
pub fn hz_to_omega(freq_hz: f32, sample_rate: f32) -> f32 {
    core::f32::consts::TAU * freq_hz / sample_rate
}

/// Convert milliseconds to samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Average a stereo pair to mono: `(left + right) · 0.5`.
#[inline]
pub fn mono_sum(left: f32, right: f32) -> f32 {
    (left + right) * 0.5
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Values below 1e-20 are replaced with zero, leaving margin before the
/// IEEE 754 subnormal range. Applied to resonator and envelope state, which
/// decay toward zero indefinitely during silence.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
