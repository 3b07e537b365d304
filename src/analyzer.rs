//! Analyzer - one call per audio frame, from samples to formants.
//!
//! Pipeline, in order:
//!
//! 1. RMS volume; frames below the threshold stop here
//! 2. Unroll the circular frame and apply the interior Hamming taper
//! 3. Autocorrelation and Levinson-Durbin
//! 4. All-pole magnitude response, normalized to a peak of 1.0
//! 5. Blend into the caller's [`SpectralState`], rebuild derivatives
//! 6. Envelope peaks → `FormantPair::peaks`
//! 7. Curvature minima → `FormantPair::curvature`
//!
//! The analyzer owns every temporary buffer the pipeline needs. They are
//! sized when the analyzer is built, so a call performs no allocation. The
//! analyzer holds no cross-call state of its own; whatever should persist
//! lives in the `SpectralState` and `FormantPair` the caller passes in.

use log::{debug, trace};
use num_complex::Complex64;

use crate::envelope::SpectralState;
use crate::error::{Error, Result};
use crate::lpc::LpcScratch;
use crate::peaks::{pick_curvature_minima, pick_envelope_peaks, FormantResult};
use crate::response::{normalize_peak, spectral_response, twiddle_table};
use crate::volume::{passes_gate, rms_volume};
use crate::window::{hamming_interior, window_frame};

/// Per-call analysis parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParams {
    /// LPC order, in `1 .. N`. Typical speech values are 24 to 40.
    pub lpc_order: usize,
    /// Sample rate of the input frame in Hz.
    pub sample_rate: f64,
    /// Frames with RMS volume below this skip formant extraction.
    pub volume_thresh: f64,
    /// Envelope bins with `log10(H)` at or below this are not formants.
    pub min_log10_h: f64,
    /// Envelope smoothing in `[0, 1]`; clamped. 0 = no smoothing, 1 = frozen.
    pub filter_h: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            lpc_order: 32,
            sample_rate: 16_000.0,
            volume_thresh: 1e-4,
            min_log10_h: -1.0,
            filter_h: 0.0,
        }
    }
}

impl AnalysisParams {
    /// Set the LPC order.
    pub fn with_lpc_order(mut self, lpc_order: usize) -> Self {
        self.lpc_order = lpc_order;
        self
    }

    /// Set the sample rate in Hz.
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the volume gate threshold.
    pub fn with_volume_thresh(mut self, volume_thresh: f64) -> Self {
        self.volume_thresh = volume_thresh;
        self
    }

    /// Set the log-magnitude floor for envelope peaks.
    pub fn with_min_log10_h(mut self, min_log10_h: f64) -> Self {
        self.min_log10_h = min_log10_h;
        self
    }

    /// Set the envelope smoothing factor.
    pub fn with_filter_h(mut self, filter_h: f64) -> Self {
        self.filter_h = filter_h;
        self
    }

    /// Spacing between response bins in Hz for a frame of `frame_len`.
    #[inline]
    pub fn bin_hz(&self, frame_len: usize) -> f64 {
        self.sample_rate / frame_len as f64
    }

    /// Check the parameters against a frame length.
    ///
    /// `filter_h` is never rejected; it is clamped when used.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidParameter` if the LPC order is not in `1 .. frame_len`,
    ///   the sample rate is not positive and finite, the volume threshold is
    ///   negative or NaN, or `min_log10_h` is NaN
    pub fn validate(&self, frame_len: usize) -> Result<()> {
        if self.lpc_order == 0 || self.lpc_order >= frame_len {
            return Err(Error::InvalidParameter(format!(
                "LPC order must be in 1..{}, got {}",
                frame_len, self.lpc_order
            )));
        }
        if !(self.sample_rate > 0.0 && self.sample_rate.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if !(self.volume_thresh >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "volume threshold must be non-negative, got {}",
                self.volume_thresh
            )));
        }
        if self.min_log10_h.is_nan() {
            return Err(Error::InvalidParameter(
                "min_log10_h must not be NaN".to_string(),
            ));
        }
        Ok(())
    }
}

/// The two results of one analysis call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormantPair {
    /// Formants from local maxima of the smoothed envelope.
    pub peaks: FormantResult,
    /// Formants from local minima of the envelope's second derivative.
    pub curvature: FormantResult,
}

/// What happened during an analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Volume was below the threshold; only the volumes were updated.
    Gated,
    /// The full pipeline ran.
    Analyzed,
}

/// Per-frame formant analyzer with preallocated scratch buffers.
///
/// # Example
///
/// ```
/// use lipformant::{AnalysisParams, FormantAnalyzer, FormantPair, SpectralState};
///
/// let n = 512;
/// let mut analyzer = FormantAnalyzer::new(n, 32).unwrap();
/// let mut state = SpectralState::new(n);
/// let mut out = FormantPair::default();
///
/// let frame = vec![0.0; n];
/// analyzer.analyze(&frame, 0, &AnalysisParams::default(), &mut state, &mut out);
/// assert_eq!(out.peaks.volume, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct FormantAnalyzer {
    frame_len: usize,
    window: Vec<f64>,
    twiddles: Vec<Complex64>,
    data: Vec<f64>,
    lpc: LpcScratch,
    fresh: Vec<f64>,
}

impl FormantAnalyzer {
    /// Create an analyzer for frames of `frame_len` samples and LPC orders
    /// up to `max_lpc_order`.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidParameter` if `frame_len < 3` or `max_lpc_order` is
    ///   not in `1 .. frame_len`
    pub fn new(frame_len: usize, max_lpc_order: usize) -> Result<Self> {
        if frame_len < 3 {
            return Err(Error::InvalidParameter(format!(
                "frame length must be at least 3, got {}",
                frame_len
            )));
        }
        if max_lpc_order == 0 || max_lpc_order >= frame_len {
            return Err(Error::InvalidParameter(format!(
                "max LPC order must be in 1..{}, got {}",
                frame_len, max_lpc_order
            )));
        }

        debug!(
            "formant analyzer: frame_len={} max_lpc_order={}",
            frame_len, max_lpc_order
        );

        Ok(Self {
            frame_len,
            window: hamming_interior(frame_len),
            twiddles: twiddle_table(frame_len),
            data: vec![0.0; frame_len],
            lpc: LpcScratch::new(max_lpc_order),
            fresh: vec![0.0; frame_len],
        })
    }

    /// Frame length `N` this analyzer was built for.
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Largest LPC order this analyzer accepts.
    #[inline]
    pub fn max_lpc_order(&self) -> usize {
        self.lpc.max_order()
    }

    /// Create a zeroed spectral state sized for this analyzer.
    pub fn new_state(&self) -> SpectralState {
        SpectralState::new(self.frame_len)
    }

    /// Normalized response of the most recent analyzed frame, before
    /// smoothing.
    #[inline]
    pub fn last_response(&self) -> &[f64] {
        &self.fresh
    }

    /// LPC coefficients of the most recent analyzed frame.
    #[inline]
    pub fn last_coefficients(&self) -> &[f64] {
        self.lpc.coefficients()
    }

    /// Analyze one frame.
    ///
    /// # Arguments
    ///
    /// * `input` - Circular frame of `N` samples
    /// * `start_index` - Index of the oldest sample in `input`, in `0 .. N`
    /// * `params` - Analysis parameters; see [`AnalysisParams::validate`]
    /// * `state` - Smoothed envelope carried across calls, `N` bins
    /// * `out` - Results; overwritten in place
    ///
    /// Both volumes in `out` are always set. When the frame is below the
    /// volume threshold nothing else changes, so the formants from the last
    /// voiced frame stay visible. Otherwise both methods rewrite f1/f2/f3,
    /// with 0.0 for formants not found.
    ///
    /// Buffer lengths and parameter ranges are preconditions checked only
    /// in debug builds.
    pub fn analyze(
        &mut self,
        input: &[f64],
        start_index: usize,
        params: &AnalysisParams,
        state: &mut SpectralState,
        out: &mut FormantPair,
    ) -> FrameOutcome {
        debug_assert_eq!(input.len(), self.frame_len, "input length mismatch");
        debug_assert_eq!(state.len(), self.frame_len, "state length mismatch");
        debug_assert!(start_index < self.frame_len, "start index out of range");
        debug_assert!(
            params.lpc_order >= 1 && params.lpc_order <= self.lpc.max_order(),
            "LPC order out of range"
        );
        debug_assert!(params.sample_rate > 0.0, "sample rate must be positive");

        let volume = rms_volume(input);
        out.peaks.volume = volume;
        out.curvature.volume = volume;

        if !passes_gate(volume, params.volume_thresh) {
            trace!(
                "gated: volume={:.6} thresh={:.6}",
                volume,
                params.volume_thresh
            );
            return FrameOutcome::Gated;
        }

        window_frame(input, start_index, &self.window, &mut self.data);

        let order = params.lpc_order;
        self.lpc.solve(&self.data, order);

        spectral_response(
            self.lpc.coefficients(),
            self.lpc.errors(),
            &self.twiddles,
            &mut self.fresh,
        );
        normalize_peak(&mut self.fresh);

        let bin_hz = params.bin_hz(self.frame_len);
        state.update(&self.fresh, params.filter_h, bin_hz);

        pick_envelope_peaks(state.h(), bin_hz, params.min_log10_h, &mut out.peaks);
        pick_curvature_minima(
            state.h(),
            state.ddh(),
            bin_hz,
            params.min_log10_h,
            &mut out.curvature,
        );

        trace!(
            "analyzed: volume={:.6} peaks=({:.1}, {:.1}, {:.1}) curvature=({:.1}, {:.1}, {:.1})",
            volume,
            out.peaks.f1,
            out.peaks.f2,
            out.peaks.f3,
            out.curvature.f1,
            out.curvature.f2,
            out.curvature.f3
        );

        FrameOutcome::Analyzed
    }
}
