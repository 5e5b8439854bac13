//! Factory presets bundled with the cortix library.
//!
//! Built-in analyser layouts that are always available without external
//! files. Each is a TOML document embedded at compile time.

use crate::AnalyserPreset;

/// Identifiers of the factory presets, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "auditory",
    "speech",
    "critical_bands",
    "octaves",
    "linear_meter",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("auditory", AUDITORY_PRESET),
    ("speech", SPEECH_PRESET),
    ("critical_bands", CRITICAL_BANDS_PRESET),
    ("octaves", OCTAVES_PRESET),
    ("linear_meter", LINEAR_METER_PRESET),
];

/// ERB-spaced auditory model across the full hearing range.
const AUDITORY_PRESET: &str = r#"
name = "Auditory"
description = "40 ERB-spaced gammatone bands, 20 Hz - 20 kHz"
scale = "erb"
num_bands = 40
min_hz = 20.0
max_hz = 20000.0
smoothing_ms = 5.0
"#;

/// Mel bands concentrated on the voice range.
const SPEECH_PRESET: &str = r#"
name = "Speech"
description = "32 Mel bands over the voice range"
scale = "mel"
num_bands = 32
min_hz = 80.0
max_hz = 8000.0
smoothing_ms = 10.0
"#;

/// One band per Bark.
const CRITICAL_BANDS_PRESET: &str = r#"
name = "Critical Bands"
description = "24 Bark critical bands"
scale = "bark"
num_bands = 24
min_hz = 20.0
max_hz = 15500.0
smoothing_ms = 10.0
"#;

/// Ten bands of exactly one octave each (20 Hz * 2^10 = 20480 Hz).
const OCTAVES_PRESET: &str = r#"
name = "Octaves"
description = "10 one-octave bands"
scale = "log"
num_bands = 10
min_hz = 20.0
max_hz = 20480.0
smoothing_ms = 20.0
"#;

/// Unsmoothed linear spacing for scientific metering.
const LINEAR_METER_PRESET: &str = r#"
name = "Linear Meter"
description = "64 linearly spaced bands, unsmoothed"
scale = "linear"
num_bands = 64
min_hz = 20.0
max_hz = 20000.0
smoothing_ms = 0.0
"#;

/// Get all factory presets.
///
/// ```rust
/// use cortix_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<AnalyserPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| AnalyserPreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name, case-insensitive.
///
/// ```rust
/// use cortix_config::get_factory_preset;
///
/// let preset = get_factory_preset("speech").unwrap();
/// let analyser = preset.build_analyser().unwrap();
/// assert_eq!(analyser.num_bands(), 32);
/// ```
pub fn get_factory_preset(name: &str) -> Option<AnalyserPreset> {
    let wanted = name.trim();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(wanted))
    {
        return AnalyserPreset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(wanted))
}

/// Identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` matches a factory preset identifier or display name.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
