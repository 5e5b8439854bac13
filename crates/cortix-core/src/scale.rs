//! Perceptual frequency scales.
//!
//! Conversions between Hz and the scales used to space analysis bands:
//!
//! ```text
//! Bark:  z   = 26.81·f / (1960 + f) − 0.53          (Traunmüller 1990)
//! ERB:   e   = 21.4·log10(4.37·f/1000 + 1)          (Glasberg & Moore 1990)
//! Mel:   m   = 2595·log10(1 + f/700)                (O'Shaughnessy 1987)
//! ```
//!
//! Each forward conversion has an exact algebraic inverse. The functions are
//! defined for positive frequencies only; `hz <= 0` (or the matching out-of-
//! domain scale value) gives meaningless results and is not checked.
//!
//! Bandwidth models:
//!
//! - [`erb_bandwidth`] - ERB in Hz, used for every gammatone filter
//! - [`critical_bandwidth`] - Zwicker & Terhardt critical bandwidth in Hz

use core::fmt;
use core::str::FromStr;

use libm::{exp2f, log10f, log2f, powf};

/// Convert frequency in Hz to the Bark scale.
///
/// # Example
/// ```rust
/// use cortix_core::hz_to_bark;
///
/// assert!((hz_to_bark(1000.0) - 8.53).abs() < 0.05);
/// ```
#[inline]
pub fn hz_to_bark(hz: f32) -> f32 {
    26.81 * hz / (1960.0 + hz) - 0.53
}

/// Convert a Bark value back to Hz.
#[inline]
pub fn bark_to_hz(bark: f32) -> f32 {
    1960.0 * (bark + 0.53) / (26.28 - bark)
}

/// Critical bandwidth in Hz at the given frequency (Zwicker & Terhardt 1980).
#[inline]
pub fn critical_bandwidth(hz: f32) -> f32 {
    let khz = hz / 1000.0;
    25.0 + 75.0 * powf(1.0 + 1.4 * khz * khz, 0.69)
}

/// Equivalent rectangular bandwidth in Hz at the given frequency.
///
/// This is the bandwidth every gammatone filter is built with, whatever scale
/// spaces the bands.
///
/// # Example
/// ```rust
/// use cortix_core::erb_bandwidth;
///
/// // ~133 Hz at 1 kHz
/// assert!((erb_bandwidth(1000.0) - 132.6).abs() < 0.5);
/// ```
#[inline]
pub fn erb_bandwidth(hz: f32) -> f32 {
    24.7 * (4.37 * hz / 1000.0 + 1.0)
}

/// Convert frequency in Hz to the ERB-rate scale.
#[inline]
pub fn hz_to_erb(hz: f32) -> f32 {
    21.4 * log10f(4.37 * hz / 1000.0 + 1.0)
}

/// Convert an ERB-rate value back to Hz.
#[inline]
pub fn erb_to_hz(erb: f32) -> f32 {
    (powf(10.0, erb / 21.4) - 1.0) * 1000.0 / 4.37
}

/// Convert frequency in Hz to the Mel scale.
#[inline]
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * log10f(1.0 + hz / 700.0)
}

/// Convert a Mel value back to Hz.
#[inline]
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (powf(10.0, mel / 2595.0) - 1.0)
}

/// Frequency scale used for band spacing.
///
/// The discriminants are the stable integer encoding used at host
/// boundaries: Linear=0, Log=1, Bark=2, ERB=3, Mel=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scale {
    /// Uniform spacing in Hz
    Linear = 0,
    /// Uniform spacing in octaves (log2 Hz)
    Log = 1,
    /// Critical bands
    Bark = 2,
    /// Equivalent rectangular bandwidth rate
    #[default]
    Erb = 3,
    /// Pitch perception
    Mel = 4,
}

impl Scale {
    /// All scales in index order.
    pub const ALL: [Scale; 5] = [
        Scale::Linear,
        Scale::Log,
        Scale::Bark,
        Scale::Erb,
        Scale::Mel,
    ];

    /// Stable integer index of this scale.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a scale by its stable index.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Scale::Linear),
            1 => Some(Scale::Log),
            2 => Some(Scale::Bark),
            3 => Some(Scale::Erb),
            4 => Some(Scale::Mel),
            _ => None,
        }
    }

    /// Lowercase identifier (`"linear"`, `"log"`, `"bark"`, `"erb"`, `"mel"`).
    pub const fn name(self) -> &'static str {
        match self {
            Scale::Linear => "linear",
            Scale::Log => "log",
            Scale::Bark => "bark",
            Scale::Erb => "erb",
            Scale::Mel => "mel",
        }
    }

    /// Map a frequency in Hz into this scale's units.
    ///
    /// Identity for [`Scale::Linear`], `log2` for [`Scale::Log`].
    #[inline]
    pub fn hz_to_scale(self, hz: f32) -> f32 {
        match self {
            Scale::Linear => hz,
            Scale::Log => log2f(hz),
            Scale::Bark => hz_to_bark(hz),
            Scale::Erb => hz_to_erb(hz),
            Scale::Mel => hz_to_mel(hz),
        }
    }

    /// Map a value in this scale's units back to Hz.
    #[inline]
    pub fn scale_to_hz(self, value: f32) -> f32 {
        match self {
            Scale::Linear => value,
            Scale::Log => exp2f(value),
            Scale::Bark => bark_to_hz(value),
            Scale::Erb => erb_to_hz(value),
            Scale::Mel => mel_to_hz(value),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown scale name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScaleError;

impl fmt::Display for ParseScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown frequency scale (expected linear, log, bark, erb or mel)")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseScaleError {}

impl FromStr for Scale {
    type Err = ParseScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scale::ALL
            .into_iter()
            .find(|scale| scale.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParseScaleError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_FREQS: [f32; 5] = [100.0, 500.0, 1000.0, 4000.0, 10000.0];

    fn approx_equal(a: f32, b: f32, tolerance: f32) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_bark_roundtrip() {
        for hz in TEST_FREQS {
            let back = bark_to_hz(hz_to_bark(hz));
            assert!(approx_equal(hz, back, hz * 0.01), "{hz} -> {back}");
        }
    }

    #[test]
    fn test_bark_known_values() {
        assert!(approx_equal(hz_to_bark(100.0), 1.0, 0.3));
        assert!(approx_equal(hz_to_bark(1000.0), 8.5, 0.2));
    }

    #[test]
    fn test_erb_roundtrip() {
        for hz in TEST_FREQS {
            let back = erb_to_hz(hz_to_erb(hz));
            assert!(approx_equal(hz, back, hz * 0.01), "{hz} -> {back}");
        }
    }

    #[test]
    fn test_erb_bandwidth() {
        assert!(approx_equal(erb_bandwidth(1000.0), 133.0, 5.0));
    }

    #[test]
    fn test_mel_roundtrip() {
        for hz in TEST_FREQS {
            let back = mel_to_hz(hz_to_mel(hz));
            assert!(approx_equal(hz, back, hz * 0.01), "{hz} -> {back}");
        }
    }

    #[test]
    fn test_mel_known_value() {
        assert!(approx_equal(hz_to_mel(1000.0), 1000.0, 50.0));
    }

    #[test]
    fn test_critical_bandwidth_grows_with_frequency() {
        // ~100 Hz below 500 Hz, roughly 20% of center frequency above it
        assert!(approx_equal(critical_bandwidth(100.0), 100.0, 5.0));
        assert!(critical_bandwidth(4000.0) > critical_bandwidth(1000.0));
        assert!(critical_bandwidth(1000.0) > critical_bandwidth(100.0));
    }

    #[test]
    fn test_scale_dispatch_matches_free_functions() {
        let hz = 1234.0;
        assert_eq!(Scale::Linear.hz_to_scale(hz), hz);
        assert!(approx_equal(Scale::Log.hz_to_scale(1024.0), 10.0, 1e-5));
        assert_eq!(Scale::Bark.hz_to_scale(hz), hz_to_bark(hz));
        assert_eq!(Scale::Erb.hz_to_scale(hz), hz_to_erb(hz));
        assert_eq!(Scale::Mel.hz_to_scale(hz), hz_to_mel(hz));

        for scale in Scale::ALL {
            let back = scale.scale_to_hz(scale.hz_to_scale(hz));
            assert!(approx_equal(back, hz, hz * 0.001), "{scale}: {back}");
        }
    }

    #[test]
    fn test_scale_index_order() {
        for (i, scale) in Scale::ALL.into_iter().enumerate() {
            assert_eq!(scale.index(), i);
            assert_eq!(Scale::from_index(i), Some(scale));
        }
        assert_eq!(Scale::Erb.index(), 3);
        assert_eq!(Scale::from_index(5), None);
    }

    #[test]
    fn test_scale_parse() {
        assert_eq!("erb".parse::<Scale>(), Ok(Scale::Erb));
        assert_eq!("ERB".parse::<Scale>(), Ok(Scale::Erb));
        assert_eq!(" Mel ".parse::<Scale>(), Ok(Scale::Mel));
        assert_eq!("octave".parse::<Scale>(), Err(ParseScaleError));
        for scale in Scale::ALL {
            assert_eq!(scale.name().parse::<Scale>(), Ok(scale));
        }
    }
}
