//! Error types for analyser configuration.

use thiserror::Error;

/// Errors raised when a configuration is rejected.
///
/// A rejected configuration leaves the engine in its previous valid state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyserError {
    /// Band count must be at least one
    #[error("band count must be at least 1 (got {num_bands})")]
    InvalidBandCount {
        /// Requested number of bands.
        num_bands: i64,
    },

    /// Sample rate must be positive and finite
    #[error("sample rate must be positive and finite (got {sample_rate})")]
    InvalidSampleRate {
        /// Requested sample rate in Hz.
        sample_rate: f32,
    },

    /// Frequency range must satisfy `0 < min_hz < max_hz`
    #[error("frequency range must satisfy 0 < min < max (got {min_hz}..{max_hz} Hz)")]
    InvalidFrequencyRange {
        /// Requested lower bound in Hz.
        min_hz: f32,
        /// Requested upper bound in Hz.
        max_hz: f32,
    },

    /// Smoothing time must be a finite number
    #[error("smoothing time must be finite (got {smoothing_ms} ms)")]
    InvalidSmoothing {
        /// Requested smoothing time in milliseconds.
        smoothing_ms: f32,
    },

    /// Scale index outside the stable encoding 0..=4
    #[error("unknown scale index {index} (expected 0=linear, 1=log, 2=bark, 3=erb, 4=mel)")]
    InvalidScaleIndex {
        /// Index received from the host.
        index: i32,
    },
}

/// Result type for analyser operations.
pub type Result<T> = core::result::Result<T, AnalyserError>;
