//! End-to-end behaviour of the analyzer on synthetic speech.

mod common;

use lipformant::volume::rms_volume;
use lipformant::{
    AnalysisParams, FormantAnalyzer, FormantPair, FormantResult, FrameOutcome, Sound,
    SpectralState,
};

const SAMPLE_RATE: f64 = 16_000.0;
const N: usize = 512;
const BIN_HZ: f64 = SAMPLE_RATE / N as f64;

fn params() -> AnalysisParams {
    AnalysisParams::default()
        .with_lpc_order(32)
        .with_sample_rate(SAMPLE_RATE)
        .with_volume_thresh(1e-3)
        .with_min_log10_h(-1.0)
        .with_filter_h(0.0)
}

fn open_vowel() -> Vec<f64> {
    common::vowel(
        N,
        SAMPLE_RATE,
        128,
        &[(500.0, 60.0), (1500.0, 90.0), (2500.0, 120.0)],
    )
}

fn assert_near(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {} ± {}, got {}",
        expected,
        tol,
        actual
    );
}

#[test]
fn vowel_formants_from_envelope_peaks() {
    let mut analyzer = FormantAnalyzer::new(N, 32).unwrap();
    let mut state = analyzer.new_state();
    let mut out = FormantPair::default();

    let x = open_vowel();
    let outcome = analyzer.analyze(&x, 0, &params(), &mut state, &mut out);

    assert_eq!(outcome, FrameOutcome::Analyzed);
    assert_near(out.peaks.f1, 500.0, BIN_HZ);
    assert_near(out.peaks.f2, 1500.0, BIN_HZ);
    assert_near(out.peaks.f3, 2500.0, BIN_HZ);
    assert_eq!(out.peaks.volume, rms_volume(&x));
    assert_eq!(out.curvature.volume, out.peaks.volume);
}

#[test]
fn rotating_by_a_pitch_period_changes_nothing() {
    // The vowel frame holds exactly four pitch periods.
    let x = open_vowel();
    let mut analyzer = FormantAnalyzer::new(N, 32).unwrap();
    let mut state_a = analyzer.new_state();
    let mut state_b = analyzer.new_state();
    let mut out_a = FormantPair::default();
    let mut out_b = FormantPair::default();

    analyzer.analyze(&x, 0, &params(), &mut state_a, &mut out_a);
    analyzer.analyze(&x, 128, &params(), &mut state_b, &mut out_b);

    assert_eq!(out_a.peaks.f1, out_b.peaks.f1);
    assert_eq!(out_a.peaks.f2, out_b.peaks.f2);
    assert_eq!(out_a.peaks.f3, out_b.peaks.f3);
}

#[test]
fn curvature_minima_are_on_the_offset_grid() {
    let mut analyzer = FormantAnalyzer::new(N, 32).unwrap();
    let mut state = analyzer.new_state();
    let mut out = FormantPair::default();
    analyzer.analyze(&open_vowel(), 0, &params(), &mut state, &mut out);

    let found: Vec<f64> = [out.curvature.f1, out.curvature.f2, out.curvature.f3]
        .into_iter()
        .take_while(|&f| f > 0.0)
        .collect();
    for w in found.windows(2) {
        assert!(w[0] < w[1], "curvature formants out of order: {:?}", found);
    }

    // Unlike the envelope peaks, the curvature method finds nothing near
    // the real formants here: their ddH minima are negative. Its only hit
    // is a mirror-image bin above Nyquist, since the scan spans the full
    // circle.
    assert_eq!(found, vec![BIN_HZ * 488.0]);
    assert!(out.curvature.f1 > SAMPLE_RATE / 2.0);
    for i in [17, 49, 81] {
        assert!(state.ddh()[i] < 0.0, "ddH at bin {}: {}", i, state.ddh()[i]);
    }
    for &f in &found {
        assert!(f >= 200.0);
        // Reported one bin below the index it was found at.
        let i = (f / BIN_HZ) as usize + 1;
        assert_eq!(f, BIN_HZ * (i - 1) as f64);
        assert!(state.ddh()[i] > 0.0 && state.ddh()[i].log10() < -2.0);
        assert!(
            state.ddh()[i] < state.ddh()[i - 1] && state.ddh()[i] < state.ddh()[i + 1]
        );
        assert!(state.h()[i].log10() > -1.0);
    }
}

#[test]
fn single_resonance_recovered_within_one_bin() {
    for &f0 in &[700.0, 1000.0, 2200.0] {
        let x = common::single_resonance(N, SAMPLE_RATE, f0);
        let mut analyzer = FormantAnalyzer::new(N, 8).unwrap();
        let mut state = analyzer.new_state();
        let mut out = FormantPair::default();

        analyzer.analyze(&x, 0, &params().with_lpc_order(8), &mut state, &mut out);

        assert_near(out.peaks.f1, f0, BIN_HZ);
        // The response spans the full circle, so the mirror image comes next.
        assert_near(out.peaks.f2, SAMPLE_RATE - out.peaks.f1, 1e-9);
    }
}

#[test]
fn silence_keeps_last_formants_and_reports_zero_volume() {
    let mut analyzer = FormantAnalyzer::new(N, 32).unwrap();
    let mut state = analyzer.new_state();
    let mut out = FormantPair::default();

    analyzer.analyze(&open_vowel(), 0, &params(), &mut state, &mut out);
    let voiced = out;
    let envelope = state.clone();

    let outcome = analyzer.analyze(&vec![0.0; N], 0, &params(), &mut state, &mut out);

    assert_eq!(outcome, FrameOutcome::Gated);
    assert_eq!(out.peaks.volume, 0.0);
    assert_eq!(out.curvature.volume, 0.0);
    assert_eq!(
        out.peaks,
        FormantResult::new(voiced.peaks.f1, voiced.peaks.f2, voiced.peaks.f3, 0.0)
    );
    assert_eq!(
        out.curvature,
        FormantResult::new(
            voiced.curvature.f1,
            voiced.curvature.f2,
            voiced.curvature.f3,
            0.0,
        )
    );
    assert_eq!(state, envelope);
}

#[test]
fn quiet_frame_reports_its_exact_rms() {
    let mut analyzer = FormantAnalyzer::new(N, 32).unwrap();
    let mut state = analyzer.new_state();
    let mut out = FormantPair {
        peaks: FormantResult::new(610.0, 1720.0, 2410.0, 0.2),
        curvature: FormantResult::new(580.0, 1690.0, 2380.0, 0.2),
    };

    let hiss = common::noise(N, 1e-4, 7);
    analyzer.analyze(&hiss, 311, &params(), &mut state, &mut out);

    let volume = rms_volume(&hiss);
    assert!(volume < 1e-3);
    assert_eq!(out.peaks, FormantResult::new(610.0, 1720.0, 2410.0, volume));
    assert_eq!(
        out.curvature,
        FormantResult::new(580.0, 1690.0, 2380.0, volume)
    );
}

#[test]
fn filter_zero_takes_fresh_response() {
    let mut analyzer = FormantAnalyzer::new(N, 32).unwrap();
    let mut state = analyzer.new_state();
    let mut out = FormantPair::default();

    analyzer.analyze(&open_vowel(), 0, &params(), &mut state, &mut out);

    assert_eq!(state.h(), analyzer.last_response());
    let max = state.h().iter().copied().fold(0.0, f64::max);
    assert!((max - 1.0).abs() < 1e-12);
    assert!(state.h().iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn filter_one_freezes_envelope() {
    let mut analyzer = FormantAnalyzer::new(N, 32).unwrap();
    let mut state = analyzer.new_state();
    let mut out = FormantPair::default();
    analyzer.analyze(&open_vowel(), 0, &params(), &mut state, &mut out);
    let first = out;
    let frozen = state.clone();

    let other = common::vowel(
        N,
        SAMPLE_RATE,
        100,
        &[(300.0, 50.0), (2300.0, 100.0), (3000.0, 150.0)],
    );
    let frozen_params = params().with_filter_h(1.0);
    let outcome = analyzer.analyze(&other, 0, &frozen_params, &mut state, &mut out);

    assert_eq!(outcome, FrameOutcome::Analyzed);
    assert_eq!(state.h(), frozen.h());
    assert_eq!(state.ddh(), frozen.ddh());
    assert_eq!(out.peaks.f1, first.peaks.f1);
    assert_eq!(out.peaks.f2, first.peaks.f2);
    assert_eq!(out.peaks.f3, first.peaks.f3);
    assert_eq!(out.peaks.volume, rms_volume(&other));
}

#[test]
fn partial_filter_blends_with_history() {
    let mut analyzer = FormantAnalyzer::new(N, 32).unwrap();
    let mut state = analyzer.new_state();
    let mut out = FormantPair::default();
    analyzer.analyze(&open_vowel(), 0, &params(), &mut state, &mut out);
    let before = state.h().to_vec();

    let other = common::vowel(N, SAMPLE_RATE, 100, &[(700.0, 80.0), (1100.0, 90.0)]);
    let blend = params().with_filter_h(0.75);
    analyzer.analyze(&other, 0, &blend, &mut state, &mut out);

    let fresh = analyzer.last_response();
    for ((&h, &old), &fresh) in state.h().iter().zip(&before).zip(fresh) {
        let expected = old + (fresh - old) * 0.25;
        assert!((h - expected).abs() < 1e-12);
    }
}

#[test]
fn independent_sources_use_independent_states() {
    let mut analyzer = FormantAnalyzer::new(N, 32).unwrap();
    let mut left = SpectralState::new(N);
    let mut right = SpectralState::new(N);
    let mut out = FormantPair::default();

    analyzer.analyze(&open_vowel(), 0, &params(), &mut left, &mut out);
    assert_eq!(right, SpectralState::new(N));

    let p = params().with_volume_thresh(0.0);
    analyzer.analyze(&vec![0.0; N], 0, &p, &mut right, &mut out);
    assert_ne!(left, right);
}

#[test]
fn max_order_frame() {
    let n = 128;
    let order = n - 1;
    let x = common::vowel(n, SAMPLE_RATE, 64, &[(500.0, 60.0), (1500.0, 90.0)]);
    let mut analyzer = FormantAnalyzer::new(n, order).unwrap();
    let mut state = analyzer.new_state();
    let mut out = FormantPair::default();

    let p = params().with_lpc_order(order);
    for start in [0, 1, n - 1] {
        analyzer.analyze(&x, start, &p, &mut state, &mut out);
        assert!(state.h().iter().all(|v| v.is_finite()));
        assert!(state.dh().iter().all(|v| v.is_finite()));
        assert!(state.ddh().iter().all(|v| v.is_finite()));
    }
}

#[test]
fn track_follows_a_vowel_then_silence() {
    let mut samples = Vec::new();
    for _ in 0..4 {
        samples.extend(open_vowel());
    }
    samples.extend(vec![0.0; 4 * N]);
    let sound = Sound::from_slice(&samples, SAMPLE_RATE).unwrap();

    let track = sound.to_formant_track(N, N, &params()).unwrap();
    assert_eq!(track.n_frames(), 8);

    let f1 = track.formant_values(1);
    let volumes = track.volumes();
    for i in 0..4 {
        assert!((f1[i] - 500.0).abs() <= BIN_HZ, "frame {}: {}", i, f1[i]);
        assert!(volumes[i] > 0.1);
    }
    for i in 4..8 {
        // Silence keeps the last voiced estimate.
        assert_eq!(f1[i], f1[3]);
        assert_eq!(volumes[i], 0.0);
    }
}
