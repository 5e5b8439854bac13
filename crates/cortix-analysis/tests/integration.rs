//! Integration tests for cortix-analysis.
//!
//! Exercise the filterbank, the analyser facade and the host facade through
//! their public APIs using synthetic signals with known properties.

use std::f32::consts::PI;

use cortix_analysis::{
    Analyser, AnalyserConfig, DEFAULT_MIN_DB, FilterbankConfig, GammatoneFilterbank,
    HostAnalyser, Scale,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a sine wave at a given frequency and amplitude.
fn sine(freq_hz: f32, sample_rate: f32, num_samples: usize, amplitude: f32) -> Vec<f32> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f32 / sample_rate).sin())
        .collect()
}

/// Deterministic xorshift noise in [-1, 1].
fn noise(num_samples: usize) -> Vec<f32> {
    let mut state = 0x1234_5678u32;
    (0..num_samples)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as i32 as f32 / i32::MAX as f32
        })
        .collect()
}

/// Index of the loudest band.
fn peak_band(envelope: &[f32]) -> usize {
    envelope
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
        .unwrap()
}

// ===========================================================================
// Peak detection
// ===========================================================================

#[test]
fn peak_detection_1khz_erb_40_bands() {
    let mut bank = GammatoneFilterbank::with_config(FilterbankConfig {
        num_bands: 40,
        sample_rate: 48000.0,
        spacing: Scale::Erb,
        ..Default::default()
    })
    .unwrap();

    bank.process(&sine(1000.0, 48000.0, 4800, 1.0));

    let peak = peak_band(bank.envelope());
    let hz = bank.center_hz(peak);
    assert!((800.0..=1200.0).contains(&hz), "peak band centered at {hz} Hz");
}

#[test]
fn peak_tracks_tone_on_every_scale() {
    for scale in Scale::ALL {
        let mut analyser = Analyser::builder()
            .scale(scale)
            .bands(48)
            .sample_rate(48000.0)
            .build()
            .unwrap();

        let envelope = analyser.process(&sine(2000.0, 48000.0, 4800, 0.5));
        let peak = peak_band(envelope);
        let band = analyser.bands()[peak];
        let hz = band.center_hz;
        assert!(
            (1500.0..=2600.0).contains(&hz),
            "{scale}: peak band centered at {hz} Hz"
        );
    }
}

// ===========================================================================
// Reset idempotence
// ===========================================================================

#[test]
fn reset_matches_fresh_configure() {
    let config = AnalyserConfig::default();
    let mut used = Analyser::with_config(config.clone()).unwrap();
    let mut fresh = Analyser::with_config(config).unwrap();

    used.process(&noise(4096));
    used.reset();

    let silence = vec![0.0f32; 512];
    let after_reset = used.process(&silence).to_vec();
    let after_configure = fresh.process(&silence).to_vec();

    assert_eq!(after_reset, after_configure);
    assert!(after_reset.iter().all(|&v| v == 0.0));
}

#[test]
fn reset_then_same_input_reproduces_output() {
    let input = sine(440.0, 48000.0, 2048, 0.8);
    let mut analyser = Analyser::new();

    let first = analyser.process(&input).to_vec();
    analyser.reset();
    let second = analyser.process(&input).to_vec();

    assert_eq!(first, second);
}

// ===========================================================================
// Silence floor
// ===========================================================================

#[test]
fn silence_maps_to_min_db_for_any_floor() {
    let mut analyser = Analyser::new();
    analyser.process(&vec![0.0f32; 1024]);

    for min_db in [-200.0, -120.0, -100.0, -60.0, -6.0] {
        let mut db = vec![0.0f32; analyser.num_bands()];
        analyser.envelope_db(&mut db, min_db);
        assert!(db.iter().all(|&v| v == min_db), "floor {min_db}: {db:?}");
        for band in 0..analyser.num_bands() {
            assert_eq!(analyser.band_envelope_db(band, min_db), min_db);
        }
    }
}

#[test]
fn loud_input_rises_above_floor() {
    let mut analyser = Analyser::new();
    analyser.process(&noise(4800));

    let mut db = vec![0.0f32; analyser.num_bands()];
    analyser.envelope_db(&mut db, DEFAULT_MIN_DB);
    assert!(db.iter().all(|v| v.is_finite()));
    assert!(db.iter().all(|&v| v > DEFAULT_MIN_DB));
}

// ===========================================================================
// Smoothing bounds
// ===========================================================================

#[test]
fn zero_smoothing_tracks_magnitudes_every_sample() {
    let mut bank = GammatoneFilterbank::with_config(FilterbankConfig {
        smoothing_ms: 0.0,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(bank.smoothing_coeff(), 0.0);

    for sample in sine(1000.0, 48000.0, 256, 1.0) {
        bank.tick(sample);
        assert_eq!(bank.envelope(), bank.magnitudes());
    }
}

#[test]
fn large_smoothing_limits_step_size() {
    let mut bank = GammatoneFilterbank::with_config(FilterbankConfig {
        smoothing_ms: 200.0,
        ..Default::default()
    })
    .unwrap();
    let coeff = bank.smoothing_coeff();
    assert!(coeff > 0.999 && coeff < 1.0);

    for sample in noise(2048) {
        let before = bank.envelope().to_vec();
        bank.tick(sample);
        for ((&prev, &next), &mag) in before.iter().zip(bank.envelope()).zip(bank.magnitudes()) {
            let step = (next - prev).abs();
            let gap = (mag - prev).abs();
            assert!(
                step <= (1.0 - coeff) * gap + 1e-6,
                "step {step} exceeds bound for gap {gap}"
            );
        }
    }
}

// ===========================================================================
// Stereo downmix
// ===========================================================================

#[test]
fn stereo_identical_channels_match_mono() {
    let signal = sine(1000.0, 48000.0, 2400, 0.7);
    let mut stereo = Analyser::new();
    let mut mono = Analyser::new();

    let a = stereo.process_stereo(&signal, &signal).to_vec();
    let b = mono.process(&signal).to_vec();
    assert_eq!(a, b);
}

#[test]
fn stereo_one_sided_is_half_amplitude() {
    let signal = sine(1000.0, 48000.0, 2400, 1.0);
    let half: Vec<f32> = signal.iter().map(|s| s * 0.5).collect();
    let silence = vec![0.0f32; signal.len()];

    let mut stereo = Analyser::new();
    let mut mono = Analyser::new();
    let a = stereo.process_stereo(&signal, &silence).to_vec();
    let b = mono.process(&half).to_vec();
    assert_eq!(a, b);
}

#[test]
fn stereo_unequal_lengths_use_shorter() {
    let left = noise(300);
    let right = noise(200);

    let mut a = Analyser::new();
    let mut b = Analyser::new();
    let out_a = a.process_stereo(&left, &right).to_vec();
    let out_b = b.process_stereo(&left[..200], &right).to_vec();
    assert_eq!(out_a, out_b);
}

// ===========================================================================
// Boundary defaults
// ===========================================================================

#[test]
fn out_of_range_bands_return_defaults() {
    let analyser = Analyser::new();
    let n = analyser.num_bands();
    assert_eq!(analyser.band_envelope(n), 0.0);
    assert_eq!(analyser.band_envelope_db(n, -90.0), -90.0);
    assert_eq!(analyser.center_hz(n), 0.0);
    assert_eq!(analyser.center_hz(usize::MAX), 0.0);

    let host = HostAnalyser::new(48000.0, 40, 3).unwrap();
    assert_eq!(host.envelope(-1), 0.0);
    assert_eq!(host.envelope_db(40), DEFAULT_MIN_DB);
    assert_eq!(host.center_hz(1000), 0.0);
}

#[test]
fn invalid_reconfigure_keeps_running_state() {
    let mut analyser = Analyser::new();
    analyser.process(&sine(1000.0, 48000.0, 1024, 1.0));
    let before = analyser.envelope().to_vec();

    let bad = AnalyserConfig {
        num_bands: 0,
        ..Default::default()
    };
    assert!(analyser.configure(bad).is_err());
    assert_eq!(analyser.envelope(), before.as_slice());
    assert_eq!(analyser.num_bands(), 40);
}

#[test]
fn host_facade_matches_analyser() {
    let input = sine(1000.0, 48000.0, 2400, 1.0);

    let mut host = HostAnalyser::new(48000.0, 40, 3).unwrap();
    let mut analyser = Analyser::new();
    host.process_block(&input);
    analyser.process(&input);

    assert_eq!(host.envelope_slice(), analyser.envelope());
    let mut db = vec![0.0f32; analyser.num_bands()];
    analyser.envelope_db(&mut db, DEFAULT_MIN_DB);
    assert_eq!(host.envelope_db_slice(), db.as_slice());
}
