//! Gammatone filterbank.
//!
//! Owns one [`GammatoneFilter`] per band plus a per-band envelope value that
//! is smoothed with a single shared coefficient. Bands are spaced on any
//! [`Scale`], but every filter's bandwidth comes from [`erb_bandwidth`] at its
//! center frequency.
//!
//! # Example
//!
//! ```rust
//! use cortix_analysis::filterbank::{FilterbankConfig, GammatoneFilterbank};
//!
//! let mut bank = GammatoneFilterbank::with_config(FilterbankConfig {
//!     num_bands: 24,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let block = vec![0.0f32; 512];
//! bank.process(&block);
//!
//! let mut db = vec![0.0; bank.num_bands()];
//! bank.envelope_db(&mut db, -100.0);
//! assert!(db.iter().all(|&v| v == -100.0));
//! ```

use cortix_core::{
    BandInfo, EnvelopeSmoother, GammatoneFilter, Scale, erb_bandwidth, generate_bands,
    linear_to_db_floor,
};

use crate::error::{AnalyserError, Result};

/// Configuration for a gammatone filterbank.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterbankConfig {
    /// Number of frequency bands
    pub num_bands: usize,
    /// Lower edge of the analysed range in Hz
    pub min_hz: f32,
    /// Upper edge of the analysed range in Hz
    pub max_hz: f32,
    /// Sample rate in Hz
    pub sample_rate: f32,
    /// Scale used to space the bands (ERB is standard for gammatone)
    pub spacing: Scale,
    /// Envelope smoothing time constant in milliseconds (`<= 0` disables)
    pub smoothing_ms: f32,
}

impl Default for FilterbankConfig {
    fn default() -> Self {
        Self {
            num_bands: 40,
            min_hz: 20.0,
            max_hz: 20000.0,
            sample_rate: 48000.0,
            spacing: Scale::Erb,
            smoothing_ms: 5.0,
        }
    }
}

impl FilterbankConfig {
    /// Check the configuration without touching any engine state.
    pub fn validate(&self) -> Result<()> {
        if self.num_bands == 0 {
            return Err(AnalyserError::InvalidBandCount { num_bands: 0 });
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(AnalyserError::InvalidSampleRate {
                sample_rate: self.sample_rate,
            });
        }
        let range_ok = self.min_hz.is_finite()
            && self.max_hz.is_finite()
            && self.min_hz > 0.0
            && self.min_hz < self.max_hz;
        if !range_ok {
            return Err(AnalyserError::InvalidFrequencyRange {
                min_hz: self.min_hz,
                max_hz: self.max_hz,
            });
        }
        if !self.smoothing_ms.is_finite() {
            return Err(AnalyserError::InvalidSmoothing {
                smoothing_ms: self.smoothing_ms,
            });
        }
        Ok(())
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f32 {
        self.sample_rate * 0.5
    }
}

/// A bank of gammatone filters with smoothed envelope output.
///
/// # Real-time Safety
///
/// All buffers are sized in [`configure`](Self::configure). [`tick`](Self::tick),
/// [`process`](Self::process) and [`reset`](Self::reset) never allocate.
#[derive(Debug, Clone)]
pub struct GammatoneFilterbank {
    config: FilterbankConfig,
    bands: Vec<BandInfo>,
    filters: Vec<GammatoneFilter>,
    magnitudes: Vec<f32>,
    envelope: Vec<f32>,
    smoother: EnvelopeSmoother,
}

impl Default for GammatoneFilterbank {
    fn default() -> Self {
        Self::new()
    }
}

impl GammatoneFilterbank {
    /// Create a filterbank with the default configuration
    /// (40 ERB bands, 20 Hz - 20 kHz, 48 kHz, 5 ms).
    pub fn new() -> Self {
        let config = FilterbankConfig::default();
        let mut bank = Self::empty(&config);
        bank.rebuild(config);
        bank
    }

    /// Create a filterbank with the given configuration.
    pub fn with_config(config: FilterbankConfig) -> Result<Self> {
        config.validate()?;
        let mut bank = Self::empty(&config);
        bank.rebuild(config);
        Ok(bank)
    }

    fn empty(config: &FilterbankConfig) -> Self {
        Self {
            config: config.clone(),
            bands: Vec::new(),
            filters: Vec::new(),
            magnitudes: Vec::new(),
            envelope: Vec::new(),
            smoother: EnvelopeSmoother::bypass(config.sample_rate),
        }
    }

    /// Regenerate bands, filters and smoothing for a new configuration.
    ///
    /// All filter and envelope state is cleared. On error nothing changes.
    pub fn configure(&mut self, config: FilterbankConfig) -> Result<()> {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "filterbank configuration rejected");
            return Err(err);
        }
        self.rebuild(config);
        Ok(())
    }

    fn rebuild(&mut self, config: FilterbankConfig) {
        if config.max_hz > config.nyquist() {
            tracing::warn!(
                max_hz = config.max_hz,
                nyquist = config.nyquist(),
                "upper bands extend past Nyquist and will alias"
            );
        }

        self.bands = generate_bands(config.spacing, config.num_bands, config.min_hz, config.max_hz);

        self.filters.clear();
        self.filters.extend(self.bands.iter().map(|band| {
            GammatoneFilter::new(
                band.center_hz,
                erb_bandwidth(band.center_hz),
                config.sample_rate,
            )
        }));

        self.smoother = EnvelopeSmoother::new(config.smoothing_ms, config.sample_rate);

        self.magnitudes.clear();
        self.magnitudes.resize(config.num_bands, 0.0);
        self.envelope.clear();
        self.envelope.resize(config.num_bands, 0.0);

        tracing::debug!(
            scale = %config.spacing,
            num_bands = config.num_bands,
            min_hz = config.min_hz,
            max_hz = config.max_hz,
            sample_rate = config.sample_rate,
            smoothing_coeff = self.smoother.coeff(),
            "filterbank configured"
        );

        self.config = config;
    }

    /// Zero all filter state and envelopes, keeping coefficients.
    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
        self.magnitudes.fill(0.0);
        self.envelope.fill(0.0);
    }

    /// Run one sample through every band.
    #[inline]
    pub fn tick(&mut self, input: f32) {
        let smoother = self.smoother;
        for ((filter, mag), env) in self
            .filters
            .iter_mut()
            .zip(self.magnitudes.iter_mut())
            .zip(self.envelope.iter_mut())
        {
            *mag = filter.tick(input);
            smoother.apply(env, *mag);
        }
    }

    /// Run a block of samples through every band. O(len × bands).
    pub fn process(&mut self, input: &[f32]) {
        for &sample in input {
            self.tick(sample);
        }
    }

    /// Number of bands.
    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    /// Active configuration.
    pub fn config(&self) -> &FilterbankConfig {
        &self.config
    }

    /// Envelope smoothing coefficient (0 = unsmoothed).
    pub fn smoothing_coeff(&self) -> f32 {
        self.smoother.coeff()
    }

    /// Smoothed per-band envelope (linear).
    pub fn envelope(&self) -> &[f32] {
        &self.envelope
    }

    /// Unsmoothed magnitudes from the most recent sample.
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Band layout, ascending by center frequency.
    pub fn bands(&self) -> &[BandInfo] {
        &self.bands
    }

    /// Write the envelope in dB into `output`, mapping silence to `min_db`.
    ///
    /// Writes `min(output.len(), num_bands)` values.
    pub fn envelope_db(&self, output: &mut [f32], min_db: f32) {
        for (out, &env) in output.iter_mut().zip(&self.envelope) {
            *out = linear_to_db_floor(env, min_db);
        }
    }

    /// Smoothed envelope of one band, or 0.0 when `band` is out of range.
    pub fn band_envelope(&self, band: usize) -> f32 {
        self.envelope.get(band).copied().unwrap_or(0.0)
    }

    /// Unsmoothed magnitude of one band, or 0.0 when `band` is out of range.
    pub fn band_magnitude(&self, band: usize) -> f32 {
        self.magnitudes.get(band).copied().unwrap_or(0.0)
    }

    /// Envelope of one band in dB, or `min_db` when silent or out of range.
    pub fn band_envelope_db(&self, band: usize, min_db: f32) -> f32 {
        self.envelope
            .get(band)
            .map_or(min_db, |&env| linear_to_db_floor(env, min_db))
    }

    /// Center frequency of one band in Hz, or 0.0 when out of range.
    pub fn center_hz(&self, band: usize) -> f32 {
        self.bands.get(band).map_or(0.0, |b| b.center_hz)
    }
}
