//! WASM bindings for lipformant.
//!
//! Exposes a stateful analysis session to JavaScript, for lip sync driven
//! from a Web Audio `AudioWorklet` or `AnalyserNode`.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { Analyzer } from './pkg/lipformant.js';
//!
//! await init();
//!
//! // frame length, LPC order, sample rate
//! const analyzer = new Analyzer(1024, 32, 48000);
//! analyzer.set_filter_h(0.5);
//!
//! // Once per frame, with a Float64Array ring buffer and its write head
//! analyzer.analyze(ring, head);
//! const [f1, f2, f3] = [analyzer.f1(), analyzer.f2(), analyzer.f3()];
//! const volume = analyzer.volume();
//! ```
//!
//! # Building for WASM
//!
//! ```bash
//! wasm-pack build --target web --features wasm
//! ```

use wasm_bindgen::prelude::*;

use crate::analyzer::{AnalysisParams, FormantAnalyzer, FormantPair, FrameOutcome};
use crate::envelope::SpectralState;

// ============================================================================
// Initialization
// ============================================================================

/// Initialize the WASM module.
///
/// Sets up the panic hook so panics show up in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

// ============================================================================
// Analyzer - one session per audio source
// ============================================================================

/// Formant analysis session.
///
/// Owns the analyzer, the smoothed envelope and the last results, so a
/// JavaScript caller only has to hand over samples.
#[wasm_bindgen]
pub struct Analyzer {
    analyzer: FormantAnalyzer,
    state: SpectralState,
    params: AnalysisParams,
    out: FormantPair,
}

#[wasm_bindgen]
impl Analyzer {
    /// Create a session.
    ///
    /// # Arguments
    ///
    /// * `frame_len` - Samples per analysis frame
    /// * `lpc_order` - LPC order, below `frame_len`
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    ///
    /// Throws if the combination is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(frame_len: usize, lpc_order: usize, sample_rate: f64) -> Result<Analyzer, JsError> {
        let params = AnalysisParams::default()
            .with_lpc_order(lpc_order)
            .with_sample_rate(sample_rate);
        params
            .validate(frame_len)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let analyzer = FormantAnalyzer::new(frame_len, lpc_order)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let state = analyzer.new_state();

        Ok(Analyzer {
            analyzer,
            state,
            params,
            out: FormantPair::default(),
        })
    }

    /// Set the volume gate threshold (RMS).
    pub fn set_volume_thresh(&mut self, value: f64) {
        self.params.volume_thresh = value.max(0.0);
    }

    /// Set the log10 floor for envelope peaks.
    pub fn set_min_log10_h(&mut self, value: f64) {
        self.params.min_log10_h = value;
    }

    /// Set the envelope smoothing factor (clamped to [0, 1] when used).
    pub fn set_filter_h(&mut self, value: f64) {
        self.params.filter_h = value;
    }

    /// Analyze one frame.
    ///
    /// Returns true if the frame passed the volume gate.
    ///
    /// # Errors
    ///
    /// Throws if the buffer length does not match the session or the
    /// start index is out of range.
    pub fn analyze(&mut self, samples: &[f64], start_index: usize) -> Result<bool, JsError> {
        let n = self.analyzer.frame_len();
        if samples.len() != n {
            return Err(JsError::new(&format!(
                "expected {} samples, got {}",
                n,
                samples.len()
            )));
        }
        if start_index >= n {
            return Err(JsError::new(&format!(
                "start index {} out of range for {} samples",
                start_index, n
            )));
        }

        let outcome = self.analyzer.analyze(
            samples,
            start_index,
            &self.params,
            &mut self.state,
            &mut self.out,
        );
        Ok(outcome == FrameOutcome::Analyzed)
    }

    /// Clear the smoothed envelope and the last results.
    pub fn reset(&mut self) {
        self.state.reset();
        self.out = FormantPair::default();
    }

    /// RMS volume of the last frame.
    pub fn volume(&self) -> f64 {
        self.out.peaks.volume
    }

    /// F1 from envelope peaks (0 if not found).
    pub fn f1(&self) -> f64 {
        self.out.peaks.f1
    }

    /// F2 from envelope peaks (0 if not found).
    pub fn f2(&self) -> f64 {
        self.out.peaks.f2
    }

    /// F3 from envelope peaks (0 if not found).
    pub fn f3(&self) -> f64 {
        self.out.peaks.f3
    }

    /// F1 from curvature minima (0 if not found).
    pub fn curvature_f1(&self) -> f64 {
        self.out.curvature.f1
    }

    /// F2 from curvature minima (0 if not found).
    pub fn curvature_f2(&self) -> f64 {
        self.out.curvature.f2
    }

    /// F3 from curvature minima (0 if not found).
    pub fn curvature_f3(&self) -> f64 {
        self.out.curvature.f3
    }

    /// Smoothed envelope as a Float64Array.
    pub fn envelope(&self) -> Vec<f64> {
        self.state.h().to_vec()
    }
}
