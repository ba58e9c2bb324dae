//! Ordinary least squares solver.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! through an SVD of the design matrix. Singular values below a relative cutoff
//! are treated as zero, which yields the minimum-norm solution when the design
//! is rank-deficient (near-collinear high-degree polynomial columns). This keeps
//! very high degree fits computable, just badly conditioned.
//!
//! Nalgebra's `QR::solve` only handles square systems, so SVD is used for tall
//! and wide designs alike.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{RegressionError, RegressionResult};

/// Cutoff multipliers tried in order if a solve produces non-finite values.
const TOLERANCE_LADDER: [f64; 3] = [1.0, 1e4, 1e8];

/// Output of a least squares solve.
#[derive(Debug, Clone)]
pub struct LeastSquaresSolution {
    pub beta: DVector<f64>,
    /// Number of singular values kept by the cutoff.
    pub rank: usize,
}

impl LeastSquaresSolution {
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.beta.len()
    }
}

/// Solve a least squares problem using SVD.
///
/// Fails with `NumericalInstability` when the design is all zeros or no cutoff
/// on the ladder yields a finite solution.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> RegressionResult<LeastSquaresSolution> {
    if x.nrows() != y.len() {
        return Err(RegressionError::invalid(format!(
            "design has {} rows but target has {} values",
            x.nrows(),
            y.len()
        )));
    }
    if x.ncols() == 0 {
        return Ok(LeastSquaresSolution {
            beta: DVector::zeros(0),
            rank: 0,
        });
    }
    if x.iter().all(|v| *v == 0.0) {
        return Err(RegressionError::numerical("design matrix is all zeros"));
    }

    let svd = x.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    if !(sigma_max.is_finite() && sigma_max > 0.0) {
        return Err(RegressionError::numerical("design matrix has no finite, non-zero singular value"));
    }

    // Same default cutoff as LAPACK-style `lstsq`: eps * max(n, p) * σ_max.
    let base_tol = sigma_max * (x.nrows().max(x.ncols()) as f64) * f64::EPSILON;

    for factor in TOLERANCE_LADDER {
        let tol = base_tol * factor;
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                let rank = svd.singular_values.iter().filter(|s| **s > tol).count();
                if rank < x.ncols() {
                    debug!(
                        "design rank {rank} < {} columns; using minimum-norm solution (tol={tol:.3e})",
                        x.ncols()
                    );
                }
                return Ok(LeastSquaresSolution { beta, rank });
            }
        }
    }

    Err(RegressionError::numerical("least squares solve produced non-finite coefficients"))
}
