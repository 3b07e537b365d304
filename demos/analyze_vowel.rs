//! Analyze a single synthetic vowel frame and print both formant estimates.

use std::f64::consts::PI;
use std::time::Instant;

use lipformant::{AnalysisParams, FormantAnalyzer, FormantPair};

/// Differentiated 125 Hz pulse train through a cascade of resonators.
fn synth_vowel(n: usize, sample_rate: f64, formants: &[(f64, f64)]) -> Vec<f64> {
    let warmup = 1024;
    let mut x: Vec<f64> = (0..n + warmup)
        .map(|i| match i % 128 {
            0 => 1.0,
            1 => -1.0,
            _ => 0.0,
        })
        .collect();

    for &(freq, bw) in formants {
        let r = (-PI * bw / sample_rate).exp();
        let b1 = 2.0 * r * (2.0 * PI * freq / sample_rate).cos();
        let b2 = -r * r;
        let gain = 1.0 - b1 - b2;
        let (mut y1, mut y2) = (0.0, 0.0);
        for v in x.iter_mut() {
            let y = gain * *v + b1 * y1 + b2 * y2;
            y2 = y1;
            y1 = y;
            *v = y;
        }
    }

    let mut frame = x.split_off(warmup);
    let peak = frame.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    for v in frame.iter_mut() {
        *v *= 0.5 / peak;
    }
    frame
}

fn print_result(label: &str, r: &lipformant::FormantResult) {
    println!(
        "  {:<10} f1={:>8.2} Hz  f2={:>8.2} Hz  f3={:>8.2} Hz  volume={:.4}",
        label, r.f1, r.f2, r.f3, r.volume
    );
}

fn main() {
    let n = 512;
    let sample_rate = 16_000.0;
    let params = AnalysisParams::default()
        .with_lpc_order(32)
        .with_sample_rate(sample_rate)
        .with_volume_thresh(1e-3)
        .with_min_log10_h(-1.0);
    params.validate(n).expect("valid parameters");

    let mut analyzer = FormantAnalyzer::new(n, params.lpc_order)
        .expect("valid analyzer");
    let mut state = analyzer.new_state();
    let mut out = FormantPair::default();

    let vowels = [
        ("/a/", [(700.0, 80.0), (1220.0, 90.0), (2600.0, 120.0)]),
        ("/ə/", [(500.0, 60.0), (1500.0, 90.0), (2500.0, 120.0)]),
        ("/i/", [(280.0, 50.0), (2250.0, 100.0), (2890.0, 120.0)]),
    ];

    println!(
        "N={} order={} sample_rate={} Hz (bin = {:.2} Hz)",
        n,
        params.lpc_order,
        sample_rate,
        params.bin_hz(n)
    );

    for (name, formants) in vowels.iter() {
        let frame = synth_vowel(n, sample_rate, formants);
        state.reset();

        let start = Instant::now();
        let outcome = analyzer.analyze(&frame, 0, &params, &mut state, &mut out);
        let elapsed = start.elapsed();

        println!(
            "\n{} (targets {:.0}/{:.0}/{:.0} Hz): {:?} in {:.2?}",
            name, formants[0].0, formants[1].0, formants[2].0, outcome, elapsed
        );
        print_result("peaks", &out.peaks);
        print_result("curvature", &out.curvature);
    }

    // Silence keeps the last estimate and only refreshes the volume.
    let outcome = analyzer.analyze(&vec![0.0; n], 0, &params, &mut state, &mut out);
    println!("\nsilence: {:?}", outcome);
    print_result("peaks", &out.peaks);
}
