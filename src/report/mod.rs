//! Reporting utilities: residuals and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::SampleSet;
use crate::error::RegressionResult;
use crate::models::FittedPolynomialModel;

/// A per-sample fitted result.
#[derive(Debug, Clone, PartialEq)]
pub struct Residual {
    pub x: Vec<f64>,
    pub y_obs: f64,
    pub y_fit: f64,
    pub residual: f64,
}

/// Compute fitted values and residuals for each sample.
pub fn compute_residuals(samples: &SampleSet, fitted: &FittedPolynomialModel) -> RegressionResult<Vec<Residual>> {
    let y_fit = fitted.predict_samples(samples)?;
    Ok(samples
        .xs()
        .iter()
        .zip(samples.ys().iter())
        .zip(y_fit)
        .map(|((x, &y_obs), y_fit)| Residual {
            x: x.clone(),
            y_obs,
            y_fit,
            residual: y_obs - y_fit,
        })
        .collect())
}

/// The `top_n` residuals with the largest magnitude, largest first.
pub fn largest_residuals(residuals: &[Residual], top_n: usize) -> Vec<Residual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}
