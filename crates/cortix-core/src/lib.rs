//! Cortix Core - perceptual scales and gammatone primitives
//!
//! This crate holds the numerical building blocks of the cortix spectrum
//! analyser. Everything here is allocation-free on the per-sample path and
//! runs without `std`.
//!
//! # Frequency Scales
//!
//! - [`Scale`] - Band spacing family (Linear, Log, Bark, ERB, Mel)
//! - [`hz_to_bark`] / [`bark_to_hz`] - Traunmüller Bark scale
//! - [`hz_to_erb`] / [`erb_to_hz`] - Glasberg & Moore ERB-rate scale
//! - [`hz_to_mel`] / [`mel_to_hz`] - O'Shaughnessy Mel scale
//! - [`critical_bandwidth`] / [`erb_bandwidth`] - Bandwidth models
//!
//! | Scale | Description | Use Case |
//! |-------|-------------|----------|
//! | Linear | Uniform Hz spacing | Scientific analysis |
//! | Log | Logarithmic (octaves) | Music, harmonics |
//! | Bark | Critical bands | Masking, loudness |
//! | ERB | Equivalent rectangular bandwidth | Auditory models |
//! | Mel | Pitch perception | Speech recognition |
//!
//! # Bands and Filters
//!
//! - [`generate_bands`] - Split `[min_hz, max_hz]` into equal steps of a scale
//! - [`GammatoneFilter`] - 4th-order cascaded complex resonator
//! - [`EnvelopeSmoother`] - Symmetric exponential envelope smoothing
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets. The band
//! generator still needs `alloc` for its output vector.
//!
//! ```toml
//! [dependencies]
//! cortix-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use cortix_core::{GammatoneFilter, Scale, erb_bandwidth, generate_bands};
//!
//! let bands = generate_bands(Scale::Erb, 40, 20.0, 20000.0);
//! let mut filters: Vec<GammatoneFilter> = bands
//!     .iter()
//!     .map(|b| GammatoneFilter::new(b.center_hz, erb_bandwidth(b.center_hz), 48000.0))
//!     .collect();
//!
//! for filter in &mut filters {
//!     let magnitude = filter.tick(0.5);
//!     assert!(magnitude >= 0.0);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bands;
pub mod gammatone;
pub mod math;
pub mod scale;
pub mod smoother;

// Re-export main types at crate root
pub use bands::{BandInfo, generate_bands};
pub use gammatone::{FilterCoefficients, GAMMATONE_ORDER, GammatoneFilter};
pub use math::{flush_denormal, hz_to_omega, linear_to_db_floor, mono_sum, ms_to_samples};
pub use scale::{
    ParseScaleError, Scale, bark_to_hz, critical_bandwidth, erb_bandwidth, erb_to_hz, hz_to_bark,
    hz_to_erb, hz_to_mel, mel_to_hz,
};
pub use smoother::{EnvelopeSmoother, smoothing_coefficient};
