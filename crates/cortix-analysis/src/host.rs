//! Host-boundary facade.
//!
//! [`HostAnalyser`] is the call surface a binding layer (WebAssembly, FFI,
//! scripting host) wraps. It takes integer band counts and scale indices as a
//! host language passes them, accepts interleaved stereo, and keeps output
//! caches that can be read in bulk after every block:
//!
//! | Host call | Method |
//! |-----------|--------|
//! | `configure(sampleRate, numBands, scaleIndex, smoothingMs)` | [`HostAnalyser::configure`] |
//! | `processBlock(ptr, n)` | [`HostAnalyser::process_block`] |
//! | `processBlockStereo(ptr, frames)` | [`HostAnalyser::process_block_stereo`] |
//! | `envelope(band)` / `envelopeDb(band)` / `getCenterHz(band)` | per-band getters |
//! | `getEnvelopePtr()` / `getEnvelopeDbPtr()` / `getCenterFreqsPtr()` | slice accessors |
//!
//! Band indices from the host are untrusted: out-of-range reads return 0.0
//! (linear, Hz) or [`DEFAULT_MIN_DB`].

use cortix_core::{Scale, mono_sum};

use crate::analyser::{AnalysisMode, Analyser, AnalyserConfig, DEFAULT_MIN_DB};
use crate::error::{AnalyserError, Result};

/// Smoothing used by [`HostAnalyser::new`].
pub const DEFAULT_SMOOTHING_MS: f32 = 5.0;

/// Analyser wrapper for host-language bindings.
#[derive(Debug, Clone)]
pub struct HostAnalyser {
    analyser: Analyser,
    envelope: Vec<f32>,
    envelope_db: Vec<f32>,
    center_freqs: Vec<f32>,
    mono_buffer: Vec<f32>,
}

impl HostAnalyser {
    /// Create an analyser with [`DEFAULT_SMOOTHING_MS`] smoothing.
    pub fn new(sample_rate: f32, num_bands: i32, scale_index: i32) -> Result<Self> {
        let config = host_config(sample_rate, num_bands, scale_index, DEFAULT_SMOOTHING_MS)?;
        let mut host = Self {
            analyser: Analyser::with_config(config)?,
            envelope: Vec::new(),
            envelope_db: Vec::new(),
            center_freqs: Vec::new(),
            mono_buffer: Vec::new(),
        };
        host.resize_caches();
        Ok(host)
    }

    /// Reconfigure; the range stays at the default 20 Hz - 20 kHz.
    ///
    /// On error the previous configuration stays active.
    pub fn configure(
        &mut self,
        sample_rate: f32,
        num_bands: i32,
        scale_index: i32,
        smoothing_ms: f32,
    ) -> Result<()> {
        let config = host_config(sample_rate, num_bands, scale_index, smoothing_ms)?;
        self.analyser.configure(config)?;
        self.resize_caches();
        Ok(())
    }

    /// Zero all analysis state and cached outputs.
    pub fn reset(&mut self) {
        self.analyser.reset();
        self.envelope.fill(0.0);
        self.envelope_db.fill(DEFAULT_MIN_DB);
    }

    /// Process a mono block and refresh the output caches.
    pub fn process_block(&mut self, input: &[f32]) {
        self.analyser.process(input);
        self.refresh_caches();
    }

    /// Process interleaved stereo (`L R L R ...`) and refresh the caches.
    ///
    /// Processes `input.len() / 2` frames; a trailing odd sample is ignored.
    pub fn process_block_stereo(&mut self, input: &[f32]) {
        let frames = input.len() / 2;
        if self.mono_buffer.len() < frames {
            self.mono_buffer.resize(frames, 0.0);
        }
        for (m, frame) in self.mono_buffer.iter_mut().zip(input.chunks_exact(2)) {
            *m = mono_sum(frame[0], frame[1]);
        }
        self.analyser.process(&self.mono_buffer[..frames]);
        self.refresh_caches();
    }

    /// Number of bands.
    pub fn num_bands(&self) -> i32 {
        self.analyser.num_bands() as i32
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.analyser.sample_rate()
    }

    /// Cached linear envelope of one band, 0.0 when out of range.
    pub fn envelope(&self, band: i32) -> f32 {
        lookup(&self.envelope, band).unwrap_or(0.0)
    }

    /// Cached dB envelope of one band, [`DEFAULT_MIN_DB`] when out of range.
    pub fn envelope_db(&self, band: i32) -> f32 {
        lookup(&self.envelope_db, band).unwrap_or(DEFAULT_MIN_DB)
    }

    /// Center frequency of one band in Hz, 0.0 when out of range.
    pub fn center_hz(&self, band: i32) -> f32 {
        lookup(&self.center_freqs, band).unwrap_or(0.0)
    }

    /// Linear envelope of every band as of the last processed block.
    pub fn envelope_slice(&self) -> &[f32] {
        &self.envelope
    }

    /// dB envelope of every band as of the last processed block.
    pub fn envelope_db_slice(&self) -> &[f32] {
        &self.envelope_db
    }

    /// Center frequency of every band in Hz.
    pub fn center_freqs(&self) -> &[f32] {
        &self.center_freqs
    }

    /// The wrapped analyser.
    pub fn analyser(&self) -> &Analyser {
        &self.analyser
    }

    fn resize_caches(&mut self) {
        let n = self.analyser.num_bands();
        self.envelope.clear();
        self.envelope.resize(n, 0.0);
        self.envelope_db.clear();
        self.envelope_db.resize(n, DEFAULT_MIN_DB);
        self.center_freqs.clear();
        self.center_freqs.extend(self.analyser.bands().iter().map(|b| b.center_hz));
    }

    fn refresh_caches(&mut self) {
        self.analyser.copy_envelope(&mut self.envelope);
        self.analyser.envelope_db(&mut self.envelope_db, DEFAULT_MIN_DB);
    }
}

/// Translate host integers into a config, rejecting what `usize`/[`Scale`]
/// cannot represent.
fn host_config(
    sample_rate: f32,
    num_bands: i32,
    scale_index: i32,
    smoothing_ms: f32,
) -> Result<AnalyserConfig> {
    let num_bands = usize::try_from(num_bands)
        .ok()
        .filter(|&n| n > 0)
        .ok_or(AnalyserError::InvalidBandCount {
            num_bands: i64::from(num_bands),
        })?;
    let scale = usize::try_from(scale_index)
        .ok()
        .and_then(Scale::from_index)
        .ok_or(AnalyserError::InvalidScaleIndex { index: scale_index })?;

    let config = AnalyserConfig {
        mode: AnalysisMode::Gammatone,
        scale,
        num_bands,
        sample_rate,
        smoothing_ms,
        ..Default::default()
    };
    config.validate()?;
    Ok(config)
}

fn lookup(values: &[f32], band: i32) -> Option<f32> {
    usize::try_from(band)
        .ok()
        .and_then(|i| values.get(i))
        .copied()
}
