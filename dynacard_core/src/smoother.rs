//! Savitzky-Golay smoothing of the surface load series.
//!
//! Each output sample is a least-squares polynomial fit over a sliding
//! window of consecutive samples, evaluated at the sample's position. Unlike
//! a moving average this preserves slope and curvature near turning points
//! of the stroke while suppressing high-frequency sensor noise.
//!
//! Larger windows reject more noise but flatten genuine card features;
//! higher polynomial orders track features more closely but re-admit noise.
//! The trade-off is left to the caller: nothing here auto-tunes.

use crate::error::{AnalysisError, Result};

/// Default smoothing window (samples, odd).
pub const DEFAULT_WINDOW: usize = 11;
/// Default polynomial order for the local fit.
pub const DEFAULT_POLYNOMIAL_ORDER: usize = 2;

/// Window and polynomial order for the local least-squares fit.
///
/// Invariant: `window` is odd, `window >= 3`, and
/// `1 <= polynomial_order < window`. Violations are configuration errors,
/// never silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothingConfig {
    pub window: usize,
    pub polynomial_order: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            polynomial_order: DEFAULT_POLYNOMIAL_ORDER,
        }
    }
}

impl SmoothingConfig {
    /// Validating constructor.
    pub fn new(window: usize, polynomial_order: usize) -> Result<Self> {
        let cfg = Self {
            window,
            polynomial_order,
        };
        cfg.check().map_err(eyre::Report::new)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.check().map_err(eyre::Report::new)
    }

    pub(crate) fn check(&self) -> std::result::Result<(), AnalysisError> {
        if self.window < 3 {
            return Err(AnalysisError::Config("window must be >= 3"));
        }
        if self.window % 2 == 0 {
            return Err(AnalysisError::Config("window must be odd"));
        }
        if self.polynomial_order == 0 {
            return Err(AnalysisError::Config("polynomial_order must be >= 1"));
        }
        if self.polynomial_order >= self.window {
            return Err(AnalysisError::Config("polynomial_order must be < window"));
        }
        Ok(())
    }
}

/// Savitzky-Golay reconstructor: the stock stand-in for physics-based
/// downhole-card reconstruction.
#[derive(Debug, Clone, Copy)]
pub struct SavitzkyGolay {
    cfg: SmoothingConfig,
}

impl SavitzkyGolay {
    pub fn new(cfg: SmoothingConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &SmoothingConfig {
        &self.cfg
    }

    /// Smooth a load series; output length equals input length.
    pub fn smooth(&self, loads: &[f64]) -> Result<Vec<f64>> {
        smooth_series(loads, &self.cfg).map_err(eyre::Report::new)
    }
}

impl dynacard_traits::Reconstructor for SavitzkyGolay {
    fn reconstruct(
        &self,
        loads: &[f64],
    ) -> std::result::Result<Vec<f64>, Box<dyn std::error::Error + Send + Sync>> {
        smooth_series(loads, &self.cfg).map_err(|e| Box::new(e) as _)
    }
}

/// Smooth `loads` with the given window and polynomial order.
///
/// Pure and deterministic: identical inputs always yield identical output.
pub fn smooth(loads: &[f64], cfg: &SmoothingConfig) -> Result<Vec<f64>> {
    smooth_series(loads, cfg).map_err(eyre::Report::new)
}

fn smooth_series(loads: &[f64], cfg: &SmoothingConfig) -> std::result::Result<Vec<f64>, AnalysisError> {
    cfg.check()?;
    let n = loads.len();
    if n < cfg.window {
        return Err(AnalysisError::InsufficientData {
            got: n,
            need: cfg.window,
        });
    }

    let window = cfg.window;
    let half = window / 2;

    // Interior points share one set of convolution weights (fit evaluated at
    // the window center).
    let center = fit_weights(window, cfg.polynomial_order, 0.0)?;
    let mut out = vec![0.0; n];
    for i in half..n - half {
        out[i] = dot(&center, &loads[i - half..=i + half]);
    }

    // Edge points: anchor the window at the boundary and evaluate the fitted
    // polynomial off-center, so no samples are truncated.
    for i in 0..half {
        let w = fit_weights(window, cfg.polynomial_order, i as f64 - half as f64)?;
        out[i] = dot(&w, &loads[..window]);
    }
    for i in n - half..n {
        let eval = i as f64 - (n - 1 - half) as f64;
        let w = fit_weights(window, cfg.polynomial_order, eval)?;
        out[i] = dot(&w, &loads[n - window..]);
    }

    Ok(out)
}

#[inline]
fn dot(weights: &[f64], samples: &[f64]) -> f64 {
    weights
        .iter()
        .zip(samples)
        .map(|(w, s)| w * s)
        .sum()
}

/// Convolution weights for a least-squares polynomial fit over integer
/// positions `-half..=half`, evaluated at `eval_x`.
///
/// With design matrix A (rows = powers of the positions), the fitted value at
/// `eval_x` is `t' (A'A)^-1 A' y` where `t` holds powers of `eval_x`. Solving
/// `(A'A) u = t` gives per-sample weights `c_j = sum_p u_p * x_j^p`, so each
/// output sample is a plain dot product with its window.
fn fit_weights(
    window: usize,
    order: usize,
    eval_x: f64,
) -> std::result::Result<Vec<f64>, AnalysisError> {
    let half = (window / 2) as i64;
    let k = order + 1;

    // Power sums over the window positions fill the normal-equation matrix.
    let mut pow_sums = vec![0.0f64; 2 * k - 1];
    for j in -half..=half {
        let x = j as f64;
        let mut xp = 1.0;
        for s in &mut pow_sums {
            *s += xp;
            xp *= x;
        }
    }
    let mut m = vec![vec![0.0f64; k]; k];
    for (p, row) in m.iter_mut().enumerate() {
        for (q, cell) in row.iter_mut().enumerate() {
            *cell = pow_sums[p + q];
        }
    }

    let mut t = vec![0.0f64; k];
    let mut xp = 1.0;
    for v in &mut t {
        *v = xp;
        xp *= eval_x;
    }

    let u = solve_linear(m, t)?;

    let mut weights = Vec::with_capacity(window);
    for j in -half..=half {
        let x = j as f64;
        let mut acc = 0.0;
        let mut xp = 1.0;
        for &coef in &u {
            acc += coef * xp;
            xp *= x;
        }
        weights.push(acc);
    }
    Ok(weights)
}

/// Gaussian elimination with partial pivoting.
///
/// The normal-equation matrix is symmetric positive definite whenever
/// `order < window` over distinct positions, so a singular pivot indicates a
/// broken precondition rather than bad data.
fn solve_linear(
    mut m: Vec<Vec<f64>>,
    mut rhs: Vec<f64>,
) -> std::result::Result<Vec<f64>, AnalysisError> {
    let k = rhs.len();
    for col in 0..k {
        let mut pivot = col;
        for row in col + 1..k {
            if m[row][col].abs() > m[pivot][col].abs() {
                pivot = row;
            }
        }
        if m[pivot][col].abs() < 1e-12 {
            return Err(AnalysisError::Config(
                "smoothing fit is degenerate for this window/order",
            ));
        }
        m.swap(col, pivot);
        rhs.swap(col, pivot);

        let diag = m[col][col];
        for row in col + 1..k {
            let factor = m[row][col] / diag;
            if factor == 0.0 {
                continue;
            }
            for c in col..k {
                m[row][c] -= factor * m[col][c];
            }
            rhs[row] -= factor * rhs[col];
        }
    }
    let mut out = vec![0.0f64; k];
    for col in (0..k).rev() {
        let mut acc = rhs[col];
        for c in col + 1..k {
            acc -= m[col][c] * out[c];
        }
        out[col] = acc / m[col][col];
    }
    Ok(out)
}

#[cfg(test)]
mod fit_weights_tests {
    use super::fit_weights;

    // A unit-sum weight vector reproduces constants exactly.
    #[test]
    fn weights_sum_to_one() {
        for (window, order) in [(3, 1), (5, 2), (11, 2), (51, 5)] {
            let w = fit_weights(window, order, 0.0).unwrap();
            let sum: f64 = w.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum {sum} for w={window} o={order}");
        }
    }

    #[test]
    fn center_weights_are_symmetric() {
        let w = fit_weights(7, 2, 0.0).unwrap();
        for i in 0..w.len() / 2 {
            assert!((w[i] - w[w.len() - 1 - i]).abs() < 1e-9);
        }
    }

    #[test]
    fn order_one_center_is_moving_average() {
        let w = fit_weights(5, 1, 0.0).unwrap();
        for v in &w {
            assert!((v - 0.2).abs() < 1e-9);
        }
    }

    #[test]
    fn edge_weights_reproduce_linear_trend() {
        // Fit over [0, 10, 20] evaluated at the left edge must return 0.
        let w = fit_weights(3, 1, -1.0).unwrap();
        let v = w[0] * 0.0 + w[1] * 10.0 + w[2] * 20.0;
        assert!(v.abs() < 1e-9, "got {v}");
    }
}
