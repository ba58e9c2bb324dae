//! Fit and score a single polynomial degree on a train/test split.
//!
//! The expander and the least squares model only ever see the train side; the
//! test side is transformed with the already-fitted expander and scored.

use log::{debug, warn};

use crate::domain::{FitQuality, Split};
use crate::error::RegressionResult;
use crate::models::{FittedPolynomialModel, fit_polynomial};

/// One fitted degree with its train/test metrics.
#[derive(Debug, Clone)]
pub struct DegreeFit {
    pub degree: i32,
    pub fitted: FittedPolynomialModel,
    pub quality: FitQuality,
}

impl DegreeFit {
    /// Test RMSE minus train RMSE.
    pub fn generalization_gap(&self) -> f64 {
        self.quality.test.rmse - self.quality.train.rmse
    }
}

pub fn fit_degree(split: &Split, degree: i32) -> RegressionResult<DegreeFit> {
    let fitted = fit_polynomial(degree, &split.train)?;

    // Parameters = terms + intercept.
    let n_params = fitted.features.n_output_features() + 1;
    if split.train.len() <= n_params {
        warn!(
            "degree {degree}: {} train samples for {n_params} parameters; fit is underdetermined",
            split.train.len()
        );
    }
    if fitted.model.rank() < fitted.model.n_features() {
        debug!(
            "degree {degree}: rank {} < {} terms, minimum-norm coefficients",
            fitted.model.rank(),
            fitted.model.n_features()
        );
    }

    let train = fitted.evaluate(&split.train)?;
    let test = fitted.evaluate(&split.test)?;
    debug!(
        "degree {degree}: train rmse={:.4} r2={:.4} | test rmse={:.4} r2={:.4}",
        train.rmse, train.r2, test.rmse, test.r2
    );

    Ok(DegreeFit {
        degree,
        fitted,
        quality: FitQuality { train, test },
    })
}
