//! Synthetic speech-like signals shared by the integration tests.

#![allow(dead_code)]

use std::f64::consts::PI;

/// Pulse train with one unit pulse every `period` samples.
pub fn pulse_train(n: usize, period: usize) -> Vec<f64> {
    (0..n)
        .map(|i| if i % period == 0 { 1.0 } else { 0.0 })
        .collect()
}

/// First difference, y[0] = x[0].
pub fn differentiate(x: &[f64]) -> Vec<f64> {
    let mut y = Vec::with_capacity(x.len());
    let mut prev = 0.0;
    for &v in x {
        y.push(v - prev);
        prev = v;
    }
    y
}

/// Two-pole resonator with unit DC gain.
pub fn resonate(x: &[f64], freq: f64, bandwidth: f64, sample_rate: f64) -> Vec<f64> {
    let r = (-PI * bandwidth / sample_rate).exp();
    let theta = 2.0 * PI * freq / sample_rate;
    let b1 = 2.0 * r * theta.cos();
    let b2 = -r * r;
    let gain = 1.0 - b1 - b2;

    let (mut y1, mut y2) = (0.0, 0.0);
    x.iter()
        .map(|&v| {
            let y = gain * v + b1 * y1 + b2 * y2;
            y2 = y1;
            y1 = y;
            y
        })
        .collect()
}

/// Scale so the largest absolute sample equals `peak`.
pub fn normalize(x: &mut [f64], peak: f64) {
    let max = x.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if max > 0.0 {
        for v in x.iter_mut() {
            *v *= peak / max;
        }
    }
}

/// Steady-state vowel: a differentiated pulse train through a cascade of
/// resonators, with a warm-up discarded so the frame is periodic.
pub fn vowel(n: usize, sample_rate: f64, pitch_period: usize, formants: &[(f64, f64)]) -> Vec<f64> {
    let warmup = 1024;
    let mut x = differentiate(&pulse_train(n + warmup, pitch_period));
    for &(freq, bw) in formants {
        x = resonate(&x, freq, bw, sample_rate);
    }
    let mut frame = x.split_off(warmup);
    normalize(&mut frame, 0.5);
    frame
}

/// Single resonance excited by a plain pulse train.
pub fn single_resonance(n: usize, sample_rate: f64, freq: f64) -> Vec<f64> {
    let warmup = 1024;
    let x = resonate(&pulse_train(n + warmup, 128), freq, 80.0, sample_rate);
    let mut frame = x[warmup..].to_vec();
    normalize(&mut frame, 0.5);
    frame
}

/// Deterministic uniform noise in [-amp, amp).
pub fn noise(n: usize, amp: f64, seed: u32) -> Vec<f64> {
    let mut s = seed;
    (0..n)
        .map(|_| {
            s = s.wrapping_mul(1_103_515_245).wrapping_add(12345);
            amp * (((s >> 16) & 0x7fff) as f64 / 16384.0 - 1.0)
        })
        .collect()
}
