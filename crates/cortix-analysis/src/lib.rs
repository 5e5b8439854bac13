//! Cortix Analysis - perceptual spectrum analysis
//!
//! This crate turns the primitives in `cortix-core` into a running analyser:
//!
//! - [`filterbank`] - Gammatone filterbank with smoothed per-band envelopes
//! - [`analyser`] - Mode-dispatching facade, config and builder
//! - [`host`] - Integer-indexed facade for host-language bindings
//! - [`error`] - Configuration errors
//!
//! ## Example
//!
//! ```rust
//! use cortix_analysis::{Analyser, Scale};
//!
//! let mut analyser = Analyser::builder()
//!     .scale(Scale::Bark)
//!     .bands(24)
//!     .sample_rate(44100.0)
//!     .build()
//!     .unwrap();
//!
//! let left = vec![0.0f32; 256];
//! let right = vec![0.0f32; 256];
//! analyser.process_stereo(&left, &right);
//!
//! for band in 0..analyser.num_bands() {
//!     let _db = analyser.band_envelope_db(band, -100.0);
//! }
//! ```
//!
//! ## Logging
//!
//! Configuration changes emit `tracing` events (`debug` on success, `warn` on
//! rejection or when the range extends past Nyquist). The per-sample and
//! per-block paths never log.

pub mod analyser;
pub mod error;
pub mod filterbank;
pub mod host;

pub use analyser::{Analyser, AnalyserBuilder, AnalyserConfig, AnalysisMode, DEFAULT_MIN_DB};
pub use error::{AnalyserError, Result};
pub use filterbank::{FilterbankConfig, GammatoneFilterbank};
pub use host::{DEFAULT_SMOOTHING_MS, HostAnalyser};

pub use cortix_core::{
    BandInfo, Scale, bark_to_hz, erb_bandwidth, erb_to_hz, generate_bands, hz_to_bark, hz_to_erb,
    hz_to_mel, mel_to_hz,
};
