//! Analyser demo: gammatone band envelopes of a two-tone signal on each scale.
//!
//! Run with: cargo run -p cortix-analysis --example analyser_demo
//!
//! Set `RUST_LOG=debug` to see configuration events.

use cortix_analysis::{Analyser, DEFAULT_MIN_DB, Scale};
use std::f32::consts::PI;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let sample_rate = 48000.0;

    // --- 440 Hz fundamental plus a quieter 3 kHz partial, 100 ms ---
    let left: Vec<f32> = (0..4800)
        .map(|i| {
            let t = i as f32 / sample_rate;
            0.8 * (2.0 * PI * 440.0 * t).sin() + 0.2 * (2.0 * PI * 3000.0 * t).sin()
        })
        .collect();
    let right = left.clone();

    for scale in Scale::ALL {
        let mut analyser = match Analyser::builder()
            .scale(scale)
            .bands(32)
            .sample_rate(sample_rate)
            .smoothing_ms(10.0)
            .build()
        {
            Ok(analyser) => analyser,
            Err(err) => {
                tracing::error!(%err, "failed to build analyser");
                return;
            }
        };

        analyser.process_stereo(&left, &right);

        let mut db = vec![0.0f32; analyser.num_bands()];
        analyser.envelope_db(&mut db, DEFAULT_MIN_DB);

        println!("=== {scale} scale, {} bands ===\n", analyser.num_bands());
        println!("  {:>10}  {:>8}", "Center Hz", "Level dB");
        for (band, level) in analyser.bands().iter().zip(&db) {
            if *level > -60.0 {
                let bar = "#".repeat(((level + 60.0) / 2.0) as usize);
                println!("  {:>10.1}  {:>8.1}  {bar}", band.center_hz, level);
            }
        }
        println!();
    }

    tracing::info!("done");
}
