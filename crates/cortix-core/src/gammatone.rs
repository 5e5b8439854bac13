//! Gammatone filter for a single auditory band.
//!
//! The gammatone impulse response models basilar-membrane motion:
//!
//! ```text
//! g(t) = t^(n−1) · exp(−2π·b·t) · cos(2π·f·t),   n = 4
//! ```
//!
//! Instead of convolving with `g`, the filter cascades four identical
//! first-order complex one-pole resonators (the all-pole approximation of
//! Slaney 1993 and Lyon 1997). Each stage computes
//!
//! ```text
//! y[k] = x[k] + r·e^(jω)·y[k−1]
//! ```
//!
//! with pole radius `r = exp(−2π·bw/fs)` and `ω = 2π·fc/fs`. The magnitude of
//! the final complex output is the instantaneous envelope of the band, so no
//! separate rectifier or Hilbert stage is needed. Cost is O(1) per sample.
//!
//! # Reference
//!
//! M. Slaney, "An Efficient Implementation of the Patterson-Holdsworth
//! Auditory Filter Bank", Apple Computer Technical Report #35, 1993.

use libm::{cosf, expf, powf, sinf, sqrtf};

use crate::math::{flush_denormal, hz_to_omega};

/// Number of cascaded resonator stages (filter order).
pub const GAMMATONE_ORDER: usize = 4;

/// Derived constants for one gammatone filter.
///
/// Computed once from `(center_hz, bandwidth_hz, sample_rate)`; read-only
/// while processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCoefficients {
    /// Pole radius `r = exp(−2π·bw/fs)`, in (0, 1) for stable operation
    pub pole_radius: f32,
    /// `cos(2π·fc/fs)`
    pub cos_omega: f32,
    /// `sin(2π·fc/fs)`
    pub sin_omega: f32,
    /// `(1 − r)^4 · 2`, normalises the cascade to roughly unity at `fc`
    pub input_gain: f32,
}

impl FilterCoefficients {
    /// Derive coefficients for a band centred at `center_hz`.
    pub fn new(center_hz: f32, bandwidth_hz: f32, sample_rate: f32) -> Self {
        let omega = hz_to_omega(center_hz, sample_rate);
        let bw = hz_to_omega(bandwidth_hz, sample_rate);
        let pole_radius = expf(-bw);

        Self {
            pole_radius,
            cos_omega: cosf(omega),
            sin_omega: sinf(omega),
            input_gain: powf(1.0 - pole_radius, GAMMATONE_ORDER as f32) * 2.0,
        }
    }
}

/// A 4th-order gammatone filter returning the instantaneous band magnitude.
///
/// Knows nothing about band layouts or smoothing; the filterbank owns those.
///
/// # Example
///
/// ```rust
/// use cortix_core::{GammatoneFilter, erb_bandwidth};
///
/// let mut filter = GammatoneFilter::new(1000.0, erb_bandwidth(1000.0), 48000.0);
/// let mut magnitude = 0.0;
/// for i in 0..4800 {
///     let t = i as f32 / 48000.0;
///     magnitude = filter.tick((core::f32::consts::TAU * 1000.0 * t).sin());
/// }
/// // Settled response to a unit sine at the center frequency
/// assert!(magnitude > 0.5 && magnitude < 1.5);
/// ```
#[derive(Debug, Clone)]
pub struct GammatoneFilter {
    center_hz: f32,
    bandwidth_hz: f32,
    sample_rate: f32,
    coeffs: FilterCoefficients,
    state_real: [f32; GAMMATONE_ORDER],
    state_imag: [f32; GAMMATONE_ORDER],
}

impl GammatoneFilter {
    /// Create a filter for the given center frequency, bandwidth and rate.
    pub fn new(center_hz: f32, bandwidth_hz: f32, sample_rate: f32) -> Self {
        Self {
            center_hz,
            bandwidth_hz,
            sample_rate,
            coeffs: FilterCoefficients::new(center_hz, bandwidth_hz, sample_rate),
            state_real: [0.0; GAMMATONE_ORDER],
            state_imag: [0.0; GAMMATONE_ORDER],
        }
    }

    /// Recompute coefficients and clear the resonator state.
    pub fn configure(&mut self, center_hz: f32, bandwidth_hz: f32, sample_rate: f32) {
        self.center_hz = center_hz;
        self.bandwidth_hz = bandwidth_hz;
        self.sample_rate = sample_rate;
        self.coeffs = FilterCoefficients::new(center_hz, bandwidth_hz, sample_rate);
        self.reset();
    }

    /// Clear the resonator state, keeping coefficients.
    pub fn reset(&mut self) {
        self.state_real = [0.0; GAMMATONE_ORDER];
        self.state_imag = [0.0; GAMMATONE_ORDER];
    }

    /// Process one sample and return the instantaneous magnitude.
    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        let FilterCoefficients {
            pole_radius: r,
            cos_omega,
            sin_omega,
            input_gain,
        } = self.coeffs;

        let mut real = input * input_gain;
        let mut imag = 0.0;

        for stage in 0..GAMMATONE_ORDER {
            let sr = self.state_real[stage];
            let si = self.state_imag[stage];

            // y = x + r·e^(jω)·y[k−1]
            let new_real = real + r * (cos_omega * sr - sin_omega * si);
            let new_imag = imag + r * (sin_omega * sr + cos_omega * si);

            self.state_real[stage] = flush_denormal(new_real);
            self.state_imag[stage] = flush_denormal(new_imag);

            real = new_real;
            imag = new_imag;
        }

        sqrtf(real * real + imag * imag)
    }

    /// Process a block, writing one magnitude per input sample.
    ///
    /// Processes `min(input.len(), output.len())` samples.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        for (out, &sample) in output.iter_mut().zip(input) {
            *out = self.tick(sample);
        }
    }

    /// Center frequency in Hz.
    pub fn center_hz(&self) -> f32 {
        self.center_hz
    }

    /// Bandwidth in Hz the filter was built with.
    pub fn bandwidth_hz(&self) -> f32 {
        self.bandwidth_hz
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coeffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::TAU;
    use crate::scale::erb_bandwidth;

    fn settled_magnitude(filter: &mut GammatoneFilter, freq: f32, samples: usize) -> f32 {
        let sr = filter.sample_rate();
        let mut peak = 0.0f32;
        for i in 0..samples {
            let x = (TAU * freq * i as f32 / sr).sin();
            let mag = filter.tick(x);
            if i > samples / 2 {
                peak = peak.max(mag);
            }
        }
        peak
    }

    #[test]
    fn test_coefficients() {
        let c = FilterCoefficients::new(12000.0, 500.0, 48000.0);
        // ω = π/2
        assert!(c.cos_omega.abs() < 1e-6);
        assert!((c.sin_omega - 1.0).abs() < 1e-6);
        assert!(c.pole_radius > 0.0 && c.pole_radius < 1.0);
        let expected_gain = (1.0 - c.pole_radius).powi(4) * 2.0;
        assert!((c.input_gain - expected_gain).abs() < 1e-9);
    }

    #[test]
    fn test_unity_at_center_frequency() {
        let mut filter = GammatoneFilter::new(1000.0, erb_bandwidth(1000.0), 48000.0);
        let mag = settled_magnitude(&mut filter, 1000.0, 9600);
        assert!(
            (mag - 1.0).abs() < 0.2,
            "Center response should be near unity, got {mag}"
        );
    }

    #[test]
    fn test_attenuates_distant_frequency() {
        let mut filter = GammatoneFilter::new(1000.0, erb_bandwidth(1000.0), 48000.0);
        let on_band = settled_magnitude(&mut filter, 1000.0, 9600);
        filter.reset();
        let off_band = settled_magnitude(&mut filter, 4000.0, 9600);
        assert!(
            off_band < on_band * 0.05,
            "4 kHz should be rejected by a 1 kHz band: {off_band} vs {on_band}"
        );
    }

    #[test]
    fn test_silence_stays_zero() {
        let mut filter = GammatoneFilter::new(440.0, erb_bandwidth(440.0), 44100.0);
        for _ in 0..1000 {
            assert_eq!(filter.tick(0.0), 0.0);
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = GammatoneFilter::new(1000.0, erb_bandwidth(1000.0), 48000.0);
        for _ in 0..100 {
            filter.tick(1.0);
        }
        filter.reset();
        assert_eq!(filter.tick(0.0), 0.0);
    }

    #[test]
    fn test_configure_resets_and_updates() {
        let mut filter = GammatoneFilter::new(1000.0, erb_bandwidth(1000.0), 48000.0);
        filter.tick(1.0);
        filter.configure(2000.0, erb_bandwidth(2000.0), 44100.0);
        assert_eq!(filter.center_hz(), 2000.0);
        assert_eq!(filter.sample_rate(), 44100.0);
        assert_eq!(
            *filter.coefficients(),
            FilterCoefficients::new(2000.0, erb_bandwidth(2000.0), 44100.0)
        );
        assert_eq!(filter.tick(0.0), 0.0);
    }

    #[test]
    fn test_process_block_matches_tick() {
        let input: [f32; 64] = core::array::from_fn(|i| if i == 0 { 1.0 } else { 0.0 });
        let mut a = GammatoneFilter::new(500.0, erb_bandwidth(500.0), 48000.0);
        let mut b = a.clone();

        let mut block = [0.0f32; 64];
        a.process_block(&input, &mut block);
        for (i, &x) in input.iter().enumerate() {
            assert_eq!(block[i], b.tick(x));
        }
    }
}
