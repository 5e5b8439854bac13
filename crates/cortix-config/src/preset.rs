//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use cortix_analysis::{Analyser, AnalyserConfig, AnalysisMode, Scale};

use crate::error::ConfigError;

/// Analyser preset stored as TOML.
///
/// Every field except `name` is optional in the file and falls back to the
/// matching [`AnalyserConfig::default`] value. Mode and scale are stored by
/// name so files stay readable and independent of enum layout.
///
/// # TOML Format
///
/// ```toml
/// name = "Speech"
/// description = "Mel bands across the voice range"
/// mode = "gammatone"
/// scale = "mel"
/// num_bands = 32
/// min_hz = 80.0
/// max_hz = 8000.0
/// sample_rate = 48000.0
/// smoothing_ms = 10.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyserPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Analysis mode name.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Band spacing scale name.
    #[serde(default = "default_scale")]
    pub scale: String,

    /// Number of bands.
    #[serde(default = "default_num_bands")]
    pub num_bands: usize,

    /// Lower edge of the analysed range in Hz.
    #[serde(default = "default_min_hz")]
    pub min_hz: f32,

    /// Upper edge of the analysed range in Hz.
    #[serde(default = "default_max_hz")]
    pub max_hz: f32,

    /// Sample rate hint in Hz; hosts usually override it at runtime.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f32,

    /// Envelope smoothing in milliseconds (`0` disables smoothing).
    #[serde(default = "default_smoothing_ms")]
    pub smoothing_ms: f32,
}

fn default_mode() -> String {
    AnalysisMode::default().name().to_string()
}

fn default_scale() -> String {
    Scale::default().name().to_string()
}

fn default_num_bands() -> usize {
    AnalyserConfig::default().num_bands
}

fn default_min_hz() -> f32 {
    AnalyserConfig::default().min_hz
}

fn default_max_hz() -> f32 {
    AnalyserConfig::default().max_hz
}

fn default_sample_rate() -> f32 {
    AnalyserConfig::default().sample_rate
}

fn default_smoothing_ms() -> f32 {
    AnalyserConfig::default().smoothing_ms
}

impl AnalyserPreset {
    /// Create a preset holding the default analyser configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(name, &AnalyserConfig::default())
    }

    /// Capture an existing configuration under a name.
    pub fn from_config(name: impl Into<String>, config: &AnalyserConfig) -> Self {
        Self {
            name: name.into(),
            description: None,
            mode: config.mode.name().to_string(),
            scale: config.scale.name().to_string(),
            num_bands: config.num_bands,
            min_hz: config.min_hz,
            max_hz: config.max_hz,
            sample_rate: config.sample_rate,
            smoothing_ms: config.smoothing_ms,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded analyser preset");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "saved analyser preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve names and validate into an [`AnalyserConfig`].
    pub fn to_config(&self) -> Result<AnalyserConfig, ConfigError> {
        let mode: AnalysisMode = self
            .mode
            .parse()
            .map_err(|_| ConfigError::UnknownMode(self.mode.clone()))?;
        let scale: Scale = self
            .scale
            .parse()
            .map_err(|_| ConfigError::UnknownScale(self.scale.clone()))?;

        let config = AnalyserConfig {
            mode,
            scale,
            num_bands: self.num_bands,
            min_hz: self.min_hz,
            max_hz: self.max_hz,
            sample_rate: self.sample_rate,
            smoothing_ms: self.smoothing_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a ready-to-run analyser from this preset.
    pub fn build_analyser(&self) -> Result<Analyser, ConfigError> {
        Ok(Analyser::with_config(self.to_config()?)?)
    }
}

impl Default for AnalyserPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
