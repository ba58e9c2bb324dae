//! Regression error metrics.
//!
//! - `mse  = mean((y_true - y_pred)^2)`
//! - `rmse = sqrt(mse)`
//! - `r2   = 1 - SS_res / SS_tot`
//!
//! `r2` is defined as `0.0` when `SS_tot = 0` (constant target): the model
//! explains no variance because there is none to explain. Naive formulas
//! return NaN or ±inf there.

use serde::{Deserialize, Serialize};

use crate::error::{RegressionError, RegressionResult};

/// The three scalar metrics reported for a fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub mse: f64,
    pub rmse: f64,
    pub r2: f64,
}

impl Metrics {
    pub fn evaluate(y_true: &[f64], y_pred: &[f64]) -> RegressionResult<Self> {
        let mse = mse(y_true, y_pred)?;
        Ok(Self {
            mse,
            rmse: mse.sqrt(),
            r2: r2(y_true, y_pred)?,
        })
    }
}

pub fn mse(y_true: &[f64], y_pred: &[f64]) -> RegressionResult<f64> {
    check_pair(y_true, y_pred)?;
    Ok(sum_squared_residuals(y_true, y_pred) / y_true.len() as f64)
}

pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> RegressionResult<f64> {
    Ok(mse(y_true, y_pred)?.sqrt())
}

pub fn r2(y_true: &[f64], y_pred: &[f64]) -> RegressionResult<f64> {
    check_pair(y_true, y_pred)?;

    // Checked on the values: a rounded mean leaves a tiny non-zero SS_tot.
    let first = y_true[0];
    if y_true.iter().all(|y| *y == first) {
        return Ok(0.0);
    }

    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|y| (y - mean) * (y - mean)).sum();

    Ok(1.0 - sum_squared_residuals(y_true, y_pred) / ss_tot)
}

fn sum_squared_residuals(y_true: &[f64], y_pred: &[f64]) -> f64 {
    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum()
}

fn check_pair(y_true: &[f64], y_pred: &[f64]) -> RegressionResult<()> {
    if y_true.is_empty() {
        return Err(RegressionError::invalid("metrics need at least one observation"));
    }
    if y_true.len() != y_pred.len() {
        return Err(RegressionError::invalid(format!(
            "metrics got {} observations but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.iter().chain(y_pred.iter()).any(|v| !v.is_finite()) {
        return Err(RegressionError::invalid("metrics inputs must be finite"));
    }
    Ok(())
}
