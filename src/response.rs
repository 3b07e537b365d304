//! Response - magnitude response of the LPC all-pole model.
//!
//! The model is evaluated bin by bin with a direct DFT-style sum rather than
//! an FFT: for each of the `N` bins at normalized frequency `ω = 2π n / N`
//!
//! ```text
//! num(ω) = Σ_{i=0}^{p} e[p-i] × exp(-j ω i)
//! den(ω) = Σ_{i=0}^{p} a[p-i] × exp(-j ω i)
//! H(n)   = |num(ω)| / |den(ω)|
//! ```
//!
//! The bins cover the full circle `[0, sample_rate)`, so the upper half
//! mirrors the lower half. Peak picking scans in increasing frequency and
//! stops after three hits, which in practice keeps it below Nyquist.
//!
//! The cost is `O(N × p)`. The complex exponentials are read from a table of
//! `N` entries built once per session, indexed by `(n × i) mod N`.

use std::f64::consts::PI;

use num_complex::Complex64;

/// Build the table `exp(-j 2π k / N)` for `k = 0 .. N`.
pub fn twiddle_table(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|k| {
            let angle = -2.0 * PI * k as f64 / n as f64;
            Complex64::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// Evaluate the all-pole response into `out`, one value per bin.
///
/// # Arguments
///
/// * `a` - LPC coefficients `a[0 ..= p]`
/// * `e` - Prediction error energies `e[0 ..= p]`
/// * `twiddles` - Table from [`twiddle_table`] for `out.len()` bins
/// * `out` - Response magnitude per bin (unnormalized)
///
/// Bins whose denominator magnitude is not above machine epsilon are left
/// at 0, as are bins whose ratio is not finite (non-finite coefficients from
/// a degenerate solve). The output is therefore always finite.
pub fn spectral_response(a: &[f64], e: &[f64], twiddles: &[Complex64], out: &mut [f64]) {
    debug_assert_eq!(a.len(), e.len(), "coefficient length mismatch");
    debug_assert_eq!(twiddles.len(), out.len(), "twiddle table length mismatch");

    let n_bins = out.len();
    if a.is_empty() || n_bins == 0 {
        out.fill(0.0);
        return;
    }
    let order = a.len() - 1;

    for (bin, h) in out.iter_mut().enumerate() {
        *h = 0.0;

        let mut num = Complex64::new(0.0, 0.0);
        let mut den = Complex64::new(0.0, 0.0);
        for i in 0..=order {
            let w = twiddles[(bin * i) % n_bins];
            num += w * e[order - i];
            den += w * a[order - i];
        }

        let num_mag = num.norm_sqr().sqrt();
        let den_mag = den.norm_sqr().sqrt();
        if den_mag > f64::EPSILON {
            let ratio = num_mag / den_mag;
            if ratio.is_finite() {
                *h = ratio;
            }
        }
    }
}

/// Scale a curve so its largest value is 1.0.
///
/// Returns the maximum found before scaling. When that maximum is not
/// positive (all zero) the curve is left untouched.
pub fn normalize_peak(curve: &mut [f64]) -> f64 {
    let max = curve.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        for v in curve.iter_mut() {
            *v /= max;
        }
    }
    max
}
