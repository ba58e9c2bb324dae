//! Ordinary least squares regression on a design matrix.
//!
//! `LinearRegression` is the unfitted configuration; `fit` returns an immutable
//! `LinearModel` holding the intercept and one coefficient per design column.
//!
//! With an intercept, columns and target are mean-centered before solving and
//! the intercept is recovered as `β0 = ȳ - x̄·β`. Centering removes the largest
//! source of collinearity in polynomial bases (every power of a positive-mean
//! input correlates with the constant).

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::domain::DesignMatrix;
use crate::error::{RegressionError, RegressionResult};
use crate::math::solve_least_squares;

/// Unfitted least squares estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearRegression {
    fit_intercept: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self { fit_intercept: true }
    }
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// Minimize `Σ (y_i - β0 - x_i·β)^2` over the design rows.
    pub fn fit(&self, design: &DesignMatrix, y: &[f64]) -> RegressionResult<LinearModel> {
        let n = design.nrows();
        let p = design.ncols();
        if n == 0 {
            return Err(RegressionError::invalid("cannot fit on an empty design matrix"));
        }
        if y.len() != n {
            return Err(RegressionError::invalid(format!(
                "design has {n} rows but target has {} values",
                y.len()
            )));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(RegressionError::invalid("target contains a missing or non-finite value"));
        }
        if p > 0 && design.matrix().iter().all(|v| *v == 0.0) {
            return Err(RegressionError::numerical("design matrix is all zeros"));
        }

        let x = design.matrix();
        let y = DVector::from_column_slice(y);

        if !self.fit_intercept {
            let sol = solve_least_squares(x, &y)?;
            return LinearModel::new(0.0, sol.beta.iter().copied().collect(), sol.rank);
        }

        let y_mean = y.mean();
        let x_means: Vec<f64> = (0..p).map(|j| x.column(j).mean()).collect();
        let xc = DMatrix::from_fn(n, p, |i, j| x[(i, j)] - x_means[j]);
        let yc = y.map(|v| v - y_mean);

        let (beta, rank) = if p > 0 && xc.iter().all(|v| *v == 0.0) {
            // Every column is constant: the intercept absorbs all of them.
            debug!("all {p} design columns are constant; coefficients set to zero");
            (vec![0.0; p], 0)
        } else {
            let sol = solve_least_squares(&xc, &yc)?;
            (sol.beta.iter().copied().collect(), sol.rank)
        };

        let shift: f64 = x_means.iter().zip(beta.iter()).map(|(m, b)| m * b).sum();
        LinearModel::new(y_mean - shift, beta, rank)
    }
}

/// Fitted parameters: `ŷ = intercept + Σ coefficients[j] · x_j`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
    rank: usize,
}

impl LinearModel {
    fn new(intercept: f64, coefficients: Vec<f64>, rank: usize) -> RegressionResult<Self> {
        if !intercept.is_finite() || coefficients.iter().any(|v| !v.is_finite()) {
            return Err(RegressionError::numerical("fit produced non-finite parameters"));
        }
        Ok(Self {
            intercept,
            coefficients,
            rank,
        })
    }

    /// Rebuild a model from stored parameters (e.g. a model file).
    ///
    /// The rank is unknown for imported parameters and is reported as full.
    pub fn from_parts(intercept: f64, coefficients: Vec<f64>) -> RegressionResult<Self> {
        if !intercept.is_finite() || coefficients.iter().any(|v| !v.is_finite()) {
            return Err(RegressionError::invalid("model parameters must be finite"));
        }
        let rank = coefficients.len();
        Ok(Self {
            intercept,
            coefficients,
            rank,
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Effective rank of the (centered) design at fit time.
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn predict(&self, design: &DesignMatrix) -> RegressionResult<Vec<f64>> {
        if design.ncols() != self.coefficients.len() {
            return Err(RegressionError::invalid(format!(
                "design has {} columns, model was fitted on {}",
                design.ncols(),
                self.coefficients.len()
            )));
        }
        if self.coefficients.is_empty() {
            return Ok(vec![self.intercept; design.nrows()]);
        }

        let beta = DVector::from_column_slice(&self.coefficients);
        let y = design.matrix() * beta;
        Ok(y.iter().map(|v| v + self.intercept).collect())
    }
}
