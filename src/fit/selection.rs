//! Degree sweep and selection.
//!
//! Each requested degree is fitted on the train split and scored on both sides.
//! The best degree is the one with the lowest test RMSE; ties go to the lower
//! degree, so a flat test curve never rewards extra terms.

use log::info;
use rayon::prelude::*;

use crate::domain::Split;
use crate::error::{RegressionError, RegressionResult};
use crate::fit::fitter::{DegreeFit, fit_degree};

/// Output of a degree sweep.
#[derive(Debug, Clone)]
pub struct DegreeSweep {
    /// Fits in the order the degrees were requested.
    pub fits: Vec<DegreeFit>,
    best_index: usize,
}

impl DegreeSweep {
    pub fn best(&self) -> &DegreeFit {
        &self.fits[self.best_index]
    }

    /// Position of `best()` in `fits`.
    pub fn best_index(&self) -> usize {
        self.best_index
    }
}

pub fn sweep_degrees(split: &Split, degrees: &[i32]) -> RegressionResult<DegreeSweep> {
    if degrees.is_empty() {
        return Err(RegressionError::invalid("no degrees to sweep"));
    }

    // Indexed parallel iterators keep the input order on collect.
    let fits: Vec<DegreeFit> = degrees
        .par_iter()
        .map(|&degree| fit_degree(split, degree))
        .collect::<RegressionResult<_>>()?;

    let best_index = select_by_test_rmse(&fits);
    let best = &fits[best_index];
    info!(
        "selected degree {} (test rmse={:.4}, train rmse={:.4})",
        best.degree, best.quality.test.rmse, best.quality.train.rmse
    );

    Ok(DegreeSweep { fits, best_index })
}

fn select_by_test_rmse(fits: &[DegreeFit]) -> usize {
    let mut best = 0;
    for (i, f) in fits.iter().enumerate().skip(1) {
        let current = &fits[best];
        let better = f.quality.test.rmse < current.quality.test.rmse
            || (f.quality.test.rmse == current.quality.test.rmse && f.degree < current.degree);
        if better {
            best = i;
        }
    }
    best
}
