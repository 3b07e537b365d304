//! Window - linearize the circular input frame and taper it.
//!
//! The capture side hands over a ring buffer plus the index of its oldest
//! sample. Analysis wants a linear frame, so the ring is unrolled starting at
//! that index before the Hamming taper is applied.
//!
//! # Window variant
//!
//! The taper is the classic Hamming curve
//!
//! ```text
//! w[i] = 0.54 - 0.46 × cos(2π × i / (N - 1))
//! ```
//!
//! applied to the interior samples `1 ..= N-2` only. The two endpoints keep
//! their raw value (weight 1.0 rather than 0.08). Output of the rest of the
//! pipeline is calibrated against this variant, so it must not be "fixed".

use std::f64::consts::PI;

/// Build the interior-only Hamming table for a frame of `n` samples.
///
/// Entries `0` and `n-1` are 1.0; everything in between follows the
/// Hamming curve.
pub fn hamming_interior(n: usize) -> Vec<f64> {
    let mut w = vec![1.0; n];
    if n < 3 {
        return w;
    }

    let denom = (n - 1) as f64;
    for (i, v) in w.iter_mut().enumerate().take(n - 1).skip(1) {
        *v = 0.54 - 0.46 * (2.0 * PI * i as f64 / denom).cos();
    }
    w
}

/// Copy a circular buffer into `out`, starting at `start_index` and wrapping.
///
/// `out[k] = input[(start_index + k) mod N]`.
pub fn copy_circular(input: &[f64], start_index: usize, out: &mut [f64]) {
    debug_assert_eq!(input.len(), out.len(), "frame length mismatch");
    debug_assert!(start_index < input.len().max(1), "start index out of range");

    let n = input.len();
    if n == 0 {
        return;
    }
    let start = start_index % n;
    let tail = n - start;
    out[..tail].copy_from_slice(&input[start..]);
    out[tail..].copy_from_slice(&input[..start]);
}

/// Multiply a frame in place by a window table of the same length.
#[inline]
pub fn apply_window(data: &mut [f64], window: &[f64]) {
    debug_assert_eq!(data.len(), window.len(), "window length mismatch");
    for (s, &w) in data.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Unroll the circular input into `out` and apply the interior Hamming taper.
///
/// `window` must come from [`hamming_interior`] for the same length; the
/// analyzer builds it once per session so the cosine is never evaluated on
/// the audio path.
pub fn window_frame(input: &[f64], start_index: usize, window: &[f64], out: &mut [f64]) {
    copy_circular(input, start_index, out);
    apply_window(out, window);
}
