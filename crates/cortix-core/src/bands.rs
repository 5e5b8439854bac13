//! Band layout generation.
//!
//! Splits a frequency range into `num_bands` steps of equal width in the units
//! of a [`Scale`], then maps every edge and midpoint back to Hz:
//!
//! ```text
//! s_lo = scale(min_hz), s_hi = scale(max_hz), step = (s_hi − s_lo) / N
//! band i: low = hz(s_lo + i·step), high = hz(s_lo + (i+1)·step),
//!         center = hz(s_lo + (i+½)·step)
//! ```
//!
//! For [`Scale::Log`] the back-converted midpoint is the geometric mean of the
//! edges; for [`Scale::Linear`] it is the arithmetic mean.

use alloc::vec::Vec;

use crate::scale::Scale;

/// One analysis band.
///
/// # Invariants
///
/// - `low_hz < center_hz < high_hz`
/// - `bandwidth_hz == high_hz - low_hz`
/// - Adjacent bands from one [`generate_bands`] call share an edge exactly:
///   `bands[i + 1].low_hz == bands[i].high_hz`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandInfo {
    /// Center frequency in Hz
    pub center_hz: f32,
    /// Edge-to-edge width in Hz
    pub bandwidth_hz: f32,
    /// Lower edge in Hz
    pub low_hz: f32,
    /// Upper edge in Hz
    pub high_hz: f32,
}

impl BandInfo {
    /// Quality factor (center / bandwidth).
    pub fn q(&self) -> f32 {
        self.center_hz / self.bandwidth_hz
    }

    /// Whether `hz` lies in `[low_hz, high_hz)`.
    pub fn contains(&self, hz: f32) -> bool {
        hz >= self.low_hz && hz < self.high_hz
    }
}

/// Generate `num_bands` bands spaced evenly on `scale` across `[min_hz, max_hz]`.
///
/// Output is ascending by index and by center frequency. With one band, that
/// band spans the whole range.
///
/// # Preconditions
///
/// `num_bands >= 1` and `0 < min_hz < max_hz`. Zero bands yields an empty
/// vector; other violations yield a nonsensical layout. Callers that accept
/// user input validate first.
///
/// # Example
///
/// ```rust
/// use cortix_core::{Scale, generate_bands};
///
/// let bands = generate_bands(Scale::Bark, 24, 20.0, 15500.0);
/// assert_eq!(bands.len(), 24);
/// assert!(bands[0].center_hz < bands[23].center_hz);
/// ```
pub fn generate_bands(scale: Scale, num_bands: usize, min_hz: f32, max_hz: f32) -> Vec<BandInfo> {
    let mut bands = Vec::with_capacity(num_bands);
    if num_bands == 0 {
        return bands;
    }

    let lo = scale.hz_to_scale(min_hz);
    let hi = scale.hz_to_scale(max_hz);
    let step = (hi - lo) / num_bands as f32;

    let mut low_hz = scale.scale_to_hz(lo);
    for i in 0..num_bands {
        let edge = lo + (i + 1) as f32 * step;
        let high_hz = scale.scale_to_hz(edge);
        let center_hz = scale.scale_to_hz(edge - 0.5 * step);

        bands.push(BandInfo {
            center_hz,
            bandwidth_hz: high_hz - low_hz,
            low_hz,
            high_hz,
        });
        low_hz = high_hz;
    }

    bands
}
