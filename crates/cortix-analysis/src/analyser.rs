//! Spectrum analyser facade.
//!
//! [`Analyser`] holds an [`AnalyserConfig`] and the engine for the active
//! [`AnalysisMode`]. Callers see one stable surface (process, envelope, dB,
//! band layout) whichever engine is behind it.
//!
//! # Example
//!
//! ```rust
//! use cortix_analysis::{Analyser, AnalyserConfig, Scale};
//!
//! let mut analyser = Analyser::with_config(AnalyserConfig {
//!     sample_rate: 48000.0,
//!     num_bands: 40,
//!     scale: Scale::Erb,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let block = vec![0.0f32; 512];
//! let envelope = analyser.process(&block);
//! assert_eq!(envelope.len(), 40);
//!
//! let mut db = vec![0.0; analyser.num_bands()];
//! analyser.envelope_db(&mut db, -100.0);
//! ```

use core::fmt;
use core::str::FromStr;

use cortix_core::{BandInfo, Scale, mono_sum};

use crate::error::Result;
use crate::filterbank::{FilterbankConfig, GammatoneFilterbank};

/// dB value reported for silent or missing bands when no floor is given.
pub const DEFAULT_MIN_DB: f32 = -100.0;

/// Analysis method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnalysisMode {
    /// Gammatone filterbank (auditory model, lowest latency)
    #[default]
    Gammatone,
}

impl AnalysisMode {
    /// All implemented modes.
    pub const ALL: [AnalysisMode; 1] = [AnalysisMode::Gammatone];

    /// Lowercase identifier.
    pub const fn name(self) -> &'static str {
        match self {
            AnalysisMode::Gammatone => "gammatone",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        AnalysisMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Configuration for the spectrum analyser.
///
/// Any change is applied by a full reconfiguration; there is no partial
/// update.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyserConfig {
    /// Analysis method
    pub mode: AnalysisMode,
    /// Frequency scale for band spacing
    pub scale: Scale,
    /// Number of frequency bands
    pub num_bands: usize,
    /// Minimum frequency in Hz
    pub min_hz: f32,
    /// Maximum frequency in Hz
    pub max_hz: f32,
    /// Sample rate in Hz
    pub sample_rate: f32,
    /// Envelope smoothing time constant in milliseconds
    pub smoothing_ms: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Gammatone,
            scale: Scale::Erb,
            num_bands: 40,
            min_hz: 20.0,
            max_hz: 20000.0,
            sample_rate: 48000.0,
            smoothing_ms: 5.0,
        }
    }
}

impl AnalyserConfig {
    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            AnalysisMode::Gammatone => self.filterbank_config().validate(),
        }
    }

    fn filterbank_config(&self) -> FilterbankConfig {
        FilterbankConfig {
            num_bands: self.num_bands,
            min_hz: self.min_hz,
            max_hz: self.max_hz,
            sample_rate: self.sample_rate,
            spacing: self.scale,
            smoothing_ms: self.smoothing_ms,
        }
    }
}

/// Builder for an [`Analyser`] with custom configuration.
///
/// ```rust
/// use cortix_analysis::{Analyser, Scale};
///
/// let analyser = Analyser::builder()
///     .scale(Scale::Bark)
///     .bands(24)
///     .range(20.0, 15500.0)
///     .sample_rate(44100.0)
///     .smoothing_ms(10.0)
///     .build()
///     .unwrap();
/// assert_eq!(analyser.num_bands(), 24);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalyserBuilder {
    config: AnalyserConfig,
}

impl AnalyserBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the analysis mode.
    pub fn mode(mut self, mode: AnalysisMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the frequency scale for band spacing.
    pub fn scale(mut self, scale: Scale) -> Self {
        self.config.scale = scale;
        self
    }

    /// Set the number of bands.
    pub fn bands(mut self, num_bands: usize) -> Self {
        self.config.num_bands = num_bands;
        self
    }

    /// Set the analysed frequency range in Hz.
    pub fn range(mut self, min_hz: f32, max_hz: f32) -> Self {
        self.config.min_hz = min_hz;
        self.config.max_hz = max_hz;
        self
    }

    /// Set the sample rate in Hz.
    pub fn sample_rate(mut self, sample_rate: f32) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Set the envelope smoothing time in milliseconds.
    pub fn smoothing_ms(mut self, smoothing_ms: f32) -> Self {
        self.config.smoothing_ms = smoothing_ms;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Validate and build the analyser.
    pub fn build(self) -> Result<Analyser> {
        Analyser::with_config(self.config)
    }
}

/// Processing engine for one analysis mode.
#[derive(Debug, Clone)]
enum Engine {
    Gammatone(GammatoneFilterbank),
}

impl Engine {
    fn build(config: &AnalyserConfig) -> Result<Self> {
        match config.mode {
            AnalysisMode::Gammatone => {
                GammatoneFilterbank::with_config(config.filterbank_config()).map(Engine::Gammatone)
            }
        }
    }

    fn configure(&mut self, config: &AnalyserConfig) -> Result<()> {
        match (self, config.mode) {
            (Engine::Gammatone(bank), AnalysisMode::Gammatone) => {
                bank.configure(config.filterbank_config())
            }
        }
    }

    #[inline]
    fn tick(&mut self, sample: f32) {
        match self {
            Engine::Gammatone(bank) => bank.tick(sample),
        }
    }

    fn process(&mut self, input: &[f32]) {
        match self {
            Engine::Gammatone(bank) => bank.process(input),
        }
    }

    fn reset(&mut self) {
        match self {
            Engine::Gammatone(bank) => bank.reset(),
        }
    }

    fn envelope(&self) -> &[f32] {
        match self {
            Engine::Gammatone(bank) => bank.envelope(),
        }
    }

    fn magnitudes(&self) -> &[f32] {
        match self {
            Engine::Gammatone(bank) => bank.magnitudes(),
        }
    }

    fn envelope_db(&self, output: &mut [f32], min_db: f32) {
        match self {
            Engine::Gammatone(bank) => bank.envelope_db(output, min_db),
        }
    }

    fn band_envelope_db(&self, band: usize, min_db: f32) -> f32 {
        match self {
            Engine::Gammatone(bank) => bank.band_envelope_db(band, min_db),
        }
    }

    fn bands(&self) -> &[BandInfo] {
        match self {
            Engine::Gammatone(bank) => bank.bands(),
        }
    }
}

/// Perceptual spectrum analyser.
///
/// Single-threaded and allocation-free while processing, apart from the mono
/// downmix buffer, which grows only when a stereo block is longer than any
/// seen before. Each instance owns all of its state; separate instances may
/// run on separate threads.
#[derive(Debug, Clone)]
pub struct Analyser {
    config: AnalyserConfig,
    engine: Engine,
    mono_buffer: Vec<f32>,
}

impl Default for Analyser {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyser {
    /// Create an analyser with the default configuration.
    pub fn new() -> Self {
        Self {
            config: AnalyserConfig::default(),
            engine: Engine::Gammatone(GammatoneFilterbank::new()),
            mono_buffer: Vec::new(),
        }
    }

    /// Create an analyser with the given configuration.
    pub fn with_config(config: AnalyserConfig) -> Result<Self> {
        let engine = Engine::build(&config)?;
        Ok(Self {
            config,
            engine,
            mono_buffer: Vec::new(),
        })
    }

    /// Start building an analyser.
    pub fn builder() -> AnalyserBuilder {
        AnalyserBuilder::new()
    }

    /// Apply a new configuration.
    ///
    /// Bands, coefficients and state are rebuilt. On error the previous
    /// configuration stays active and its state is untouched.
    pub fn configure(&mut self, config: AnalyserConfig) -> Result<()> {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "analyser configuration rejected");
            return Err(err);
        }
        if config.mode == self.config.mode {
            self.engine.configure(&config)?;
        } else {
            self.engine = Engine::build(&config)?;
        }
        tracing::debug!(mode = %config.mode, scale = %config.scale, "analyser configured");
        self.config = config;
        Ok(())
    }

    /// Zero all filter and envelope state without recomputing coefficients.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Process a single mono sample.
    #[inline]
    pub fn process_sample(&mut self, sample: f32) {
        self.engine.tick(sample);
    }

    /// Process a mono block and return the updated envelope.
    ///
    /// The slice is valid until the next mutating call.
    pub fn process(&mut self, input: &[f32]) -> &[f32] {
        self.engine.process(input);
        self.engine.envelope()
    }

    /// Process a stereo block, analysing the average of both channels.
    ///
    /// Processes `min(left.len(), right.len())` frames.
    pub fn process_stereo(&mut self, left: &[f32], right: &[f32]) -> &[f32] {
        let frames = left.len().min(right.len());
        if self.mono_buffer.len() < frames {
            self.mono_buffer.resize(frames, 0.0);
        }

        let mono = &mut self.mono_buffer[..frames];
        for ((m, &l), &r) in mono.iter_mut().zip(left).zip(right) {
            *m = mono_sum(l, r);
        }

        self.engine.process(&self.mono_buffer[..frames]);
        self.engine.envelope()
    }

    /// Active analysis mode.
    pub fn mode(&self) -> AnalysisMode {
        self.config.mode
    }

    /// Active configuration.
    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Number of bands.
    pub fn num_bands(&self) -> usize {
        self.engine.bands().len()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    /// Smoothed envelope (linear).
    pub fn envelope(&self) -> &[f32] {
        self.engine.envelope()
    }

    /// Unsmoothed magnitudes from the most recent sample.
    pub fn magnitudes(&self) -> &[f32] {
        self.engine.magnitudes()
    }

    /// Write the envelope in dB into `output`, mapping silence to `min_db`.
    pub fn envelope_db(&self, output: &mut [f32], min_db: f32) {
        self.engine.envelope_db(output, min_db);
    }

    /// Copy the linear envelope into `output`; returns the number copied.
    pub fn copy_envelope(&self, output: &mut [f32]) -> usize {
        let envelope = self.engine.envelope();
        let len = output.len().min(envelope.len());
        output[..len].copy_from_slice(&envelope[..len]);
        len
    }

    /// Envelope of one band, or 0.0 when out of range.
    pub fn band_envelope(&self, band: usize) -> f32 {
        self.engine.envelope().get(band).copied().unwrap_or(0.0)
    }

    /// Envelope of one band in dB, or `min_db` when silent or out of range.
    pub fn band_envelope_db(&self, band: usize, min_db: f32) -> f32 {
        self.engine.band_envelope_db(band, min_db)
    }

    /// Center frequency of one band in Hz, or 0.0 when out of range.
    pub fn center_hz(&self, band: usize) -> f32 {
        self.engine.bands().get(band).map_or(0.0, |b| b.center_hz)
    }

    /// Band layout.
    pub fn bands(&self) -> &[BandInfo] {
        self.engine.bands()
    }
}
