//! Envelope - the smoothed spectral envelope carried across frames.
//!
//! The only state that survives from one analysis call to the next is the
//! smoothed response curve `H` and its first and second differences. It is
//! owned by the caller (one instance per audio source) and lent to the
//! analyzer for the duration of a call.
//!
//! # Smoothing
//!
//! Each new normalized response `H'` is blended into `H` with a one-pole
//! filter:
//!
//! ```text
//! H[i] += (H'[i] - H[i]) × (1 - filter)       filter clamped to [0, 1]
//! ```
//!
//! `filter = 0` replaces the envelope outright, `filter = 1` freezes it.
//!
//! # Derivatives
//!
//! With `Δf = sample_rate / N` the bin spacing in Hz:
//!
//! ```text
//! dH[i]  = (H[i]  - H[i-1])  / Δf     i ≥ 1,   dH[0]  = dH[1]
//! ddH[i] = (dH[i] - dH[i-1]) / Δf     i ≥ 1,   ddH[0] = ddH[1]
//! ```

use crate::error::{Error, Result};

/// Smoothed response curve and its derivatives, persisted across calls.
///
/// All three curves have the same length `N`, equal to the analysis frame
/// length. A fresh state is all zeros.
///
/// Only one analysis call may use a given state at a time; analyze several
/// sources by giving each its own state.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralState {
    h: Vec<f64>,
    dh: Vec<f64>,
    ddh: Vec<f64>,
}

impl SpectralState {
    /// Create a zeroed state for `n` bins.
    pub fn new(n: usize) -> Self {
        Self {
            h: vec![0.0; n],
            dh: vec![0.0; n],
            ddh: vec![0.0; n],
        }
    }

    /// Create a state from a previously saved envelope.
    ///
    /// The derivatives are rebuilt from the curve using `bin_hz` as the bin
    /// spacing.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidParameter` if the curve has fewer than 2 bins,
    ///   contains non-finite values, or `bin_hz` is not positive
    pub fn from_curve(h: Vec<f64>, bin_hz: f64) -> Result<Self> {
        if h.len() < 2 {
            return Err(Error::InvalidParameter(format!(
                "envelope needs at least 2 bins, got {}",
                h.len()
            )));
        }
        if h.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter(
                "envelope contains non-finite values".to_string(),
            ));
        }
        if !(bin_hz > 0.0) || !bin_hz.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "bin spacing must be positive, got {}",
                bin_hz
            )));
        }

        let n = h.len();
        let mut state = Self {
            h,
            dh: vec![0.0; n],
            ddh: vec![0.0; n],
        };
        state.update_derivatives(bin_hz);
        Ok(state)
    }

    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.h.len()
    }

    /// Whether the state has no bins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.h.is_empty()
    }

    /// Smoothed response curve.
    #[inline]
    pub fn h(&self) -> &[f64] {
        &self.h
    }

    /// First derivative of the smoothed curve, per Hz.
    #[inline]
    pub fn dh(&self) -> &[f64] {
        &self.dh
    }

    /// Second derivative of the smoothed curve, per Hz².
    #[inline]
    pub fn ddh(&self) -> &[f64] {
        &self.ddh
    }

    /// Zero all three curves, as at the start of a new session.
    pub fn reset(&mut self) {
        self.h.fill(0.0);
        self.dh.fill(0.0);
        self.ddh.fill(0.0);
    }

    /// Blend a fresh normalized response into the envelope, then rebuild
    /// the derivatives.
    pub fn update(&mut self, fresh: &[f64], filter: f64, bin_hz: f64) {
        smooth_envelope(&mut self.h, fresh, filter);
        self.update_derivatives(bin_hz);
    }

    fn update_derivatives(&mut self, bin_hz: f64) {
        update_derivatives(&self.h, &mut self.dh, bin_hz);
        update_derivatives(&self.dh, &mut self.ddh, bin_hz);
    }
}

/// One-pole blend of `fresh` into `h`.
///
/// `filter` is clamped to `[0, 1]` first; a NaN filter is treated as 0.
pub fn smooth_envelope(h: &mut [f64], fresh: &[f64], filter: f64) {
    debug_assert_eq!(h.len(), fresh.len(), "envelope length mismatch");

    let filter = if filter.is_nan() {
        0.0
    } else {
        filter.clamp(0.0, 1.0)
    };
    let gain = 1.0 - filter;
    for (hv, &fv) in h.iter_mut().zip(fresh.iter()) {
        *hv += (fv - *hv) * gain;
    }
}

/// First difference of `curve` divided by `bin_hz`, mirrored at bin 0.
pub fn update_derivatives(curve: &[f64], out: &mut [f64], bin_hz: f64) {
    debug_assert_eq!(curve.len(), out.len(), "derivative length mismatch");

    let n = curve.len();
    if n < 2 {
        out.fill(0.0);
        return;
    }
    for i in 1..n {
        out[i] = (curve[i] - curve[i - 1]) / bin_hz;
    }
    out[0] = out[1];
}
