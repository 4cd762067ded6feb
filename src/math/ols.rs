//! Ordinary least squares with an intercept.
//!
//! Both fitters in this crate solve small problems of the form:
//!
//! ```text
//! minimize Σ (y_i - b0 - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - Columns and the response are centered first; the intercept is recovered as
//!   `b0 = mean(y) - mean(x)^T β`. This keeps the intercept out of the SVD, so a
//!   constant feature column (e.g. every row in the same month) gets `β = 0`
//!   instead of sharing weight with the intercept.
//! - SVD solves tall systems robustly (nalgebra's `QR::solve` is for square
//!   systems). Singular values under the tolerance are treated as zero, which
//!   gives the minimum-norm solution for rank-deficient designs.

use nalgebra::{DMatrix, DVector};

/// Fitted coefficients of `y = intercept + x^T coefficients`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    /// Column means of the design (before centering).
    pub x_means: Vec<f64>,
    /// Sum of squared residuals on the training rows.
    pub sse: f64,
    pub n: usize,
}

impl LinearFit {
    pub fn predict(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(b, v)| b * v)
                .sum::<f64>()
    }
}

/// Fit `y` on the columns of `x` (one row per observation, no intercept column).
///
/// Returns `None` for empty input, mismatched shapes, or when no finite
/// solution can be found.
pub fn fit_with_intercept(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<LinearFit> {
    let n = x.nrows();
    if n == 0 || y.len() != n {
        return None;
    }

    let y_mean = y.mean();
    let x_means: Vec<f64> = x.column_iter().map(|c| c.mean()).collect();

    let mut xc = x.clone();
    for (j, mean) in x_means.iter().enumerate() {
        xc.column_mut(j).add_scalar_mut(-mean);
    }
    let yc = y.add_scalar(-y_mean);

    let beta = solve_least_squares(&xc, &yc)?;
    let intercept = y_mean - beta.iter().zip(&x_means).map(|(b, m)| b * m).sum::<f64>();
    let sse = (&yc - &xc * &beta).norm_squared();

    Some(LinearFit {
        intercept,
        coefficients: beta.iter().copied().collect(),
        x_means,
        sse,
        n,
    })
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if no finite solution is found.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
