//! Preset management for the cortix spectrum analyser.
//!
//! Analyser layouts (scale, band count, range, smoothing) are stored as small
//! TOML documents so hosts can ship, share and switch them at runtime.
//!
//! # Features
//!
//! - **Presets**: Load and save [`AnalyserPreset`] files
//! - **Validation**: Presets resolve to a checked `AnalyserConfig`
//! - **Factory Presets**: Built-in layouts for common use cases
//!
//! # Example
//!
//! ```rust,no_run
//! use cortix_config::{AnalyserPreset, get_factory_preset};
//!
//! // Start from a factory layout and tweak it
//! let mut preset = get_factory_preset("speech").unwrap();
//! preset.num_bands = 48;
//! preset.save("presets/speech_fine.toml").unwrap();
//!
//! // Later, load it and build an analyser
//! let preset = AnalyserPreset::load("presets/speech_fine.toml").unwrap();
//! let mut analyser = preset.build_analyser().unwrap();
//! analyser.process(&[0.0; 256]);
//! ```

mod error;
mod preset;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::AnalyserPreset;
