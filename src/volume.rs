//! Volume - RMS loudness of an analysis frame and the silence gate.
//!
//! The gate is the first stage of every analysis call. A frame whose RMS is
//! below the configured threshold skips the LPC pipeline entirely, so the
//! consumer keeps seeing the last formants that were measured on voiced
//! audio instead of flickering to zero between words.

/// Root-mean-square amplitude of a frame.
///
/// ```text
/// volume = sqrt( (1/N) × Σ x[n]² )
/// ```
///
/// An empty frame and an all-zero frame both have a volume of exactly 0.
pub fn rms_volume(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = samples.iter().map(|&s| s * s).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Whether a frame of the given volume is loud enough to analyze.
///
/// Only a volume strictly below the threshold is rejected, so a volume equal
/// to the threshold passes.
#[inline]
pub fn passes_gate(volume: f64, volume_thresh: f64) -> bool {
    volume >= volume_thresh
}
