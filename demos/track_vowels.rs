//! Track formants through a glide between two synthetic vowels.
//!
//! Prints one line per frame: time, volume and F1/F2/F3 from envelope peaks.

use std::f64::consts::PI;

use lipformant::{AnalysisParams, Sound};

/// Pulse-excited resonator cascade whose formants move linearly from
/// `from` to `to` over the length of the signal.
fn synth_glide(n: usize, sample_rate: f64, from: [f64; 3], to: [f64; 3]) -> Vec<f64> {
    let bandwidths = [70.0, 90.0, 120.0];
    let mut state = [[0.0f64; 2]; 3];
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let t = i as f64 / n as f64;
        let mut v = match i % 128 {
            0 => 1.0,
            1 => -1.0,
            _ => 0.0,
        };
        for k in 0..3 {
            let freq = from[k] + (to[k] - from[k]) * t;
            let r = (-PI * bandwidths[k] / sample_rate).exp();
            let b1 = 2.0 * r * (2.0 * PI * freq / sample_rate).cos();
            let b2 = -r * r;
            let y = (1.0 - b1 - b2) * v + b1 * state[k][0] + b2 * state[k][1];
            state[k][1] = state[k][0];
            state[k][0] = y;
            v = y;
        }
        out.push(v);
    }

    let peak = out.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    out.iter().map(|v| 0.5 * v / peak).collect()
}

fn main() {
    let sample_rate = 16_000.0;
    let from = [700.0, 1220.0, 2600.0];
    let to = [300.0, 2200.0, 2900.0];
    let mut samples = synth_glide(16_000, sample_rate, from, to);
    samples.extend(std::iter::repeat(0.0).take(4_000));

    let sound = Sound::from_slice(&samples, sample_rate).expect("valid sound");
    let params = AnalysisParams::default()
        .with_lpc_order(32)
        .with_volume_thresh(1e-3)
        .with_filter_h(0.5);

    let track = sound
        .to_formant_track(512, 256, &params)
        .expect("valid track parameters");

    println!(
        "{} frames, time step {:.4}s, duration {:.3}s",
        track.n_frames(),
        track.time_step(),
        sound.duration()
    );

    let times = track.times();
    let volumes = track.volumes();
    let f1 = track.formant_values(1);
    let f2 = track.formant_values(2);
    let f3 = track.formant_values(3);
    for i in (0..track.n_frames()).step_by(4) {
        println!(
            "{:>7.3}s  vol={:.4}  F1={:>8.2}  F2={:>8.2}  F3={:>8.2}",
            times[i], volumes[i], f1[i], f2[i], f3[i]
        );
    }
}
