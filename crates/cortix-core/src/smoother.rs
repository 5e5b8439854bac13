//! Symmetric exponential envelope smoothing.
//!
//! One coefficient serves both rising and falling input:
//!
//! ```text
//! env[n] = coeff · env[n−1] + (1 − coeff) · mag[n]
//! coeff  = exp(−1 / (τ · fs)),  τ = smoothing_ms / 1000
//! ```
//!
//! `smoothing_ms <= 0` gives `coeff = 0`, which makes the envelope equal to
//! the instantaneous magnitude. Asymmetric attack/release belongs to display
//! code built on top of the envelope, not here.

use libm::expf;

use crate::math::{flush_denormal, ms_to_samples};

/// Smoothing coefficient for a time constant in milliseconds.
///
/// Returns 0.0 (no smoothing) when `smoothing_ms <= 0`.
///
/// # Example
/// ```rust
/// use cortix_core::smoothing_coefficient;
///
/// assert_eq!(smoothing_coefficient(0.0, 48000.0), 0.0);
/// let c = smoothing_coefficient(5.0, 48000.0);
/// assert!(c > 0.99 && c < 1.0);
/// ```
#[inline]
pub fn smoothing_coefficient(smoothing_ms: f32, sample_rate: f32) -> f32 {
    if smoothing_ms > 0.0 {
        // τ·fs expressed in samples
        expf(-1.0 / ms_to_samples(smoothing_ms, sample_rate))
    } else {
        0.0
    }
}

/// Exponential smoother shared by every band of a filterbank.
///
/// Holds only the coefficient; the per-band envelope values live in the
/// caller's buffer so they can be read out as one contiguous slice.
///
/// # Invariants
///
/// - `coeff` is in [0, 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeSmoother {
    coeff: f32,
    smoothing_ms: f32,
    sample_rate: f32,
}

impl EnvelopeSmoother {
    /// Create a smoother with the given time constant.
    pub fn new(smoothing_ms: f32, sample_rate: f32) -> Self {
        Self {
            coeff: smoothing_coefficient(smoothing_ms, sample_rate),
            smoothing_ms,
            sample_rate,
        }
    }

    /// Smoother that passes magnitudes straight through.
    pub fn bypass(sample_rate: f32) -> Self {
        Self::new(0.0, sample_rate)
    }

    /// Advance one envelope value by one sample.
    #[inline]
    pub fn advance(&self, envelope: f32, magnitude: f32) -> f32 {
        flush_denormal(self.coeff * envelope + (1.0 - self.coeff) * magnitude)
    }

    /// Advance a single envelope value in place and return it.
    #[inline]
    pub fn apply(&self, envelope: &mut f32, magnitude: f32) -> f32 {
        *envelope = self.advance(*envelope, magnitude);
        *envelope
    }

    /// Smoothing coefficient (0 = none).
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Whether the envelope tracks the magnitude exactly.
    pub fn is_bypassed(&self) -> bool {
        self.coeff == 0.0
    }

    /// Time constant in milliseconds.
    pub fn smoothing_ms(&self) -> f32 {
        self.smoothing_ms
    }

    /// Sample rate the coefficient was derived for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

impl Default for EnvelopeSmoother {
    fn default() -> Self {
        Self::new(5.0, 48000.0)
    }
}
