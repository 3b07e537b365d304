//! LPC - autocorrelation and the Levinson-Durbin solver.
//!
//! Documentation sources:
//! - Makhoul (1975): "Linear prediction: A tutorial review"
//! - Rabiner & Schafer (1978): "Digital Processing of Speech Signals", §8.3
//!
//! The solver works on the autocorrelation normal equations. Each order step
//! builds the extended coefficient vector `U = [a_0 .. a_k, 0]` and its time
//! reversal `V`, then combines them with the reflection coefficient λ:
//!
//! ```text
//! a'[i]    = U[i] + λ × V[i]          i = 0 ..= k+1
//! e[k+1]   = e[k] × (1 - λ²)
//! ```
//!
//! No stability check is applied to λ. When |λ| > 1 the error energy goes
//! negative and the resulting all-pole filter is unstable; when `e[k]` is 0
//! the coefficients become non-finite. Both cases are passed downstream
//! unchanged and the spectral stage turns them into "no peak".

/// Autocorrelation of `data` for lags `0 ..= order`, written into `r`.
///
/// ```text
/// r[l] = Σ_{n=0}^{N-l-1} data[n] × data[n+l]
/// ```
///
/// Lags at or beyond the frame length are 0.
pub fn autocorrelation(data: &[f64], order: usize, r: &mut [f64]) {
    debug_assert!(r.len() > order, "autocorrelation buffer too short");

    let n = data.len();
    for (lag, out) in r.iter_mut().enumerate().take(order + 1) {
        if lag >= n {
            *out = 0.0;
            continue;
        }
        *out = data[..n - lag]
            .iter()
            .zip(&data[lag..])
            .map(|(&x, &y)| x * y)
            .sum();
    }
}

/// Levinson-Durbin recursion.
///
/// Solves for the LPC polynomial `a[0 ..= order]` (with `a[0] = 1`) and the
/// per-order prediction error energies `e[0 ..= order]` (with `e[0] = 1`).
/// `u` and `v` are scratch space of at least `order + 1` entries; only the
/// first `k + 2` are touched at step `k`.
///
/// # Arguments
///
/// * `r` - Autocorrelation, at least `order + 1` lags
/// * `order` - LPC order, at least 1
/// * `a` - Output LPC coefficients
/// * `e` - Output prediction error energies
/// * `u`, `v` - Scratch vectors
pub fn levinson_durbin(
    r: &[f64],
    order: usize,
    a: &mut [f64],
    e: &mut [f64],
    u: &mut [f64],
    v: &mut [f64],
) {
    debug_assert!(order >= 1, "LPC order must be at least 1");
    debug_assert!(r.len() > order, "autocorrelation too short for order");
    debug_assert!(a.len() > order && e.len() > order, "output too short");
    debug_assert!(u.len() > order && v.len() > order, "scratch too short");

    a[..=order].fill(0.0);
    e[..=order].fill(0.0);

    a[0] = 1.0;
    e[0] = 1.0;
    a[1] = -r[1] / r[0];
    e[1] = r[0] + r[1] * a[1];

    for k in 1..order {
        let mut acc = 0.0;
        for j in 0..=k {
            acc += a[j] * r[k + 1 - j];
        }
        let lambda = -acc / e[k];

        let len = k + 2;
        u[..=k].copy_from_slice(&a[..=k]);
        u[k + 1] = 0.0;
        for i in 0..len {
            v[i] = u[len - 1 - i];
        }

        for i in 0..len {
            a[i] = u[i] + lambda * v[i];
        }
        e[k + 1] = e[k] * (1.0 - lambda * lambda);
    }
}

/// Reusable buffers for one LPC analysis of up to `max_order`.
///
/// Allocated once per session; [`LpcScratch::solve`] only writes into them.
#[derive(Debug, Clone)]
pub struct LpcScratch {
    max_order: usize,
    order: usize,
    r: Vec<f64>,
    a: Vec<f64>,
    e: Vec<f64>,
    u: Vec<f64>,
    v: Vec<f64>,
}

impl LpcScratch {
    /// Create buffers for orders up to `max_order`.
    pub fn new(max_order: usize) -> Self {
        let len = max_order + 1;
        Self {
            max_order,
            order: 0,
            r: vec![0.0; len],
            a: vec![0.0; len],
            e: vec![0.0; len],
            u: vec![0.0; len],
            v: vec![0.0; len],
        }
    }

    /// Largest order these buffers can hold.
    #[inline]
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Run autocorrelation and the solver on a windowed frame.
    pub fn solve(&mut self, data: &[f64], order: usize) {
        debug_assert!(order <= self.max_order, "order exceeds scratch capacity");

        self.order = order;
        autocorrelation(data, order, &mut self.r);
        levinson_durbin(
            &self.r,
            order,
            &mut self.a,
            &mut self.e,
            &mut self.u,
            &mut self.v,
        );
    }

    /// Autocorrelation lags `0 ..= order` from the last solve.
    #[inline]
    pub fn autocorrelation(&self) -> &[f64] {
        &self.r[..=self.order]
    }

    /// LPC coefficients `a[0 ..= order]` from the last solve.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.a[..=self.order]
    }

    /// Prediction error energies `e[0 ..= order]` from the last solve.
    #[inline]
    pub fn errors(&self) -> &[f64] {
        &self.e[..=self.order]
    }
}
