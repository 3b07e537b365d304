//! Peaks - pick f1/f2/f3 from the smoothed envelope.
//!
//! Two independent heuristics read the same envelope:
//!
//! - **Envelope peaks**: local maxima of `H` whose `log10(H)` clears the
//!   configured floor. Reported at `Δf × i`.
//! - **Curvature minima**: local minima of `ddH` with `log10(ddH) < -2`,
//!   at bins where `log10(H)` also clears the floor. Reported at
//!   `Δf × (i - 1)`, one bin lower than the envelope method for the same
//!   index. The offset is part of the calibration of this method.
//!
//! Both scan bins `1 ..= N-2` in increasing frequency, ignore anything
//! below [`MIN_FORMANT_HZ`], and assign hits to f1, f2, f3 in scan order.
//! Fewer than three hits leave the remaining fields at 0.0.

/// Frequencies below this are never reported as formants.
pub const MIN_FORMANT_HZ: f64 = 200.0;

/// `log10(ddH)` must be below this for a curvature minimum to count.
pub const MAX_LOG10_DDH: f64 = -2.0;

/// Formants and loudness of one frame, as found by one extraction method.
///
/// A frequency of 0.0 means "not found".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormantResult {
    /// First formant in Hz.
    pub f1: f64,
    /// Second formant in Hz.
    pub f2: f64,
    /// Third formant in Hz.
    pub f3: f64,
    /// RMS volume of the frame.
    pub volume: f64,
}

impl FormantResult {
    /// Create a result from explicit values.
    pub fn new(f1: f64, f2: f64, f3: f64, volume: f64) -> Self {
        Self { f1, f2, f3, volume }
    }

    /// Get formant n (1-based index).
    ///
    /// Returns None for numbers outside 1..=3 and for formants that were
    /// not found.
    pub fn get_formant(&self, n: usize) -> Option<f64> {
        let f = match n {
            1 => self.f1,
            2 => self.f2,
            3 => self.f3,
            _ => return None,
        };
        if f > 0.0 {
            Some(f)
        } else {
            None
        }
    }

    /// Number of formants found (0 to 3).
    pub fn n_formants(&self) -> usize {
        [self.f1, self.f2, self.f3].iter().filter(|&&f| f > 0.0).count()
    }

    /// Store up to three hits in f1, f2, f3, zero-filling the rest.
    fn set_formants(&mut self, hits: &Hits) {
        self.f1 = hits.freqs[0];
        self.f2 = hits.freqs[1];
        self.f3 = hits.freqs[2];
    }
}

/// Hits collected during one scan, in scan order.
#[derive(Default)]
struct Hits {
    freqs: [f64; 3],
    count: usize,
}

impl Hits {
    /// Record a hit. Returns true once all three are filled.
    fn push(&mut self, freq: f64) -> bool {
        self.freqs[self.count] = freq;
        self.count += 1;
        self.count == self.freqs.len()
    }
}

/// `log10(x) > floor`, false for NaN.
#[inline]
fn log_above(x: f64, floor: f64) -> bool {
    x.log10() > floor
}

/// Local maxima of `h` with `log10(h) > min_log10_h`.
///
/// Only f1/f2/f3 of `out` are written; its volume is left alone.
pub fn pick_envelope_peaks(h: &[f64], bin_hz: f64, min_log10_h: f64, out: &mut FormantResult) {
    let mut hits = Hits::default();
    for i in 1..h.len().saturating_sub(1) {
        let freq = bin_hz * i as f64;
        if freq < MIN_FORMANT_HZ {
            continue;
        }
        let is_peak = h[i] > h[i - 1] && h[i] > h[i + 1];
        if is_peak && log_above(h[i], min_log10_h) && hits.push(freq) {
            break;
        }
    }
    out.set_formants(&hits);
}

/// Local minima of `ddh` that are small and positive, at bins where the
/// envelope clears `min_log10_h`.
///
/// Non-positive `ddh` values never qualify. Only f1/f2/f3 of `out` are
/// written; its volume is left alone.
pub fn pick_curvature_minima(
    h: &[f64],
    ddh: &[f64],
    bin_hz: f64,
    min_log10_h: f64,
    out: &mut FormantResult,
) {
    debug_assert_eq!(h.len(), ddh.len(), "curve length mismatch");

    let mut hits = Hits::default();
    for i in 1..h.len().saturating_sub(1) {
        let freq = bin_hz * (i - 1) as f64;
        if freq < MIN_FORMANT_HZ {
            continue;
        }
        let is_min = ddh[i] < ddh[i - 1] && ddh[i] < ddh[i + 1];
        let small = ddh[i] > 0.0 && ddh[i].log10() < MAX_LOG10_DDH;
        if is_min && small && log_above(h[i], min_log10_h) && hits.push(freq) {
            break;
        }
    }
    out.set_formants(&hits);
}
