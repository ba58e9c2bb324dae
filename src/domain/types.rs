//! Shared domain types.
//!
//! The pipeline passes these between stages as explicit values:
//!
//! `SampleSet -> Split -> DesignMatrix -> LinearModel -> Metrics`
//!
//! Nothing here is mutated after construction.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{RegressionError, RegressionResult};
use crate::math::Metrics;

/// An ordered set of `(x, y)` observations.
///
/// Invariants (checked on construction):
/// - at least one sample
/// - every `x` has the same dimensionality, which is at least 1
/// - every value is finite
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    xs: Vec<Vec<f64>>,
    ys: Vec<f64>,
    dim: usize,
}

impl SampleSet {
    pub fn new(xs: Vec<Vec<f64>>, ys: Vec<f64>) -> RegressionResult<Self> {
        if xs.is_empty() {
            return Err(RegressionError::invalid("sample set is empty"));
        }
        if xs.len() != ys.len() {
            return Err(RegressionError::invalid(format!(
                "sample set has {} inputs but {} targets",
                xs.len(),
                ys.len()
            )));
        }

        let dim = xs[0].len();
        if dim == 0 {
            return Err(RegressionError::invalid("sample inputs must have at least one dimension"));
        }
        for (i, (x, y)) in xs.iter().zip(ys.iter()).enumerate() {
            if x.len() != dim {
                return Err(RegressionError::invalid(format!(
                    "sample {i} has dimension {}, expected {dim}",
                    x.len()
                )));
            }
            if x.iter().any(|v| !v.is_finite()) || !y.is_finite() {
                return Err(RegressionError::invalid(format!("sample {i} contains a missing or non-finite value")));
            }
        }

        Ok(Self { xs, ys, dim })
    }

    /// Build a sample set with scalar inputs.
    pub fn from_scalar(xs: &[f64], ys: &[f64]) -> RegressionResult<Self> {
        Self::new(xs.iter().map(|&x| vec![x]).collect(), ys.to_vec())
    }

    pub fn len(&self) -> usize {
        self.ys.len()
    }

    /// A constructed sample set is never empty.
    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    /// Input dimensionality shared by every sample.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn xs(&self) -> &[Vec<f64>] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Select samples by index, in the given order.
    ///
    /// # Panics
    /// Panics if `indices` is empty or contains an out-of-range index. Only used
    /// by the splitter, which constructs valid index lists.
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        assert!(!indices.is_empty(), "selection must be non-empty");
        Self {
            xs: indices.iter().map(|&i| self.xs[i].clone()).collect(),
            ys: indices.iter().map(|&i| self.ys[i]).collect(),
            dim: self.dim,
        }
    }

    /// Summary stats over the first input dimension and the target.
    pub fn stats(&self) -> DatasetStats {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for (x, &y) in self.xs.iter().zip(self.ys.iter()) {
            x_min = x_min.min(x[0]);
            x_max = x_max.max(x[0]);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        DatasetStats {
            n_points: self.len(),
            dim: self.dim,
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

/// Summary stats about a sample set (for reports).
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub dim: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Regression input: one row per sample, one column per term.
///
/// Column order is fixed by whoever built the matrix; `terms` labels each
/// column so coefficients can be reported against it.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    matrix: DMatrix<f64>,
    terms: Vec<String>,
}

impl DesignMatrix {
    /// Build a design matrix from raw rows with generic `f0, f1, ...` labels.
    pub fn from_rows(rows: &[Vec<f64>]) -> RegressionResult<Self> {
        if rows.is_empty() {
            return Err(RegressionError::invalid("design matrix has no rows"));
        }
        let ncols = rows[0].len();
        if rows.iter().any(|r| r.len() != ncols) {
            return Err(RegressionError::invalid("design matrix rows have differing lengths"));
        }
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(RegressionError::invalid("design matrix contains non-finite values"));
        }

        let matrix = DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]);
        let terms = (0..ncols).map(|j| format!("f{j}")).collect();
        Ok(Self { matrix, terms })
    }

    pub(crate) fn from_parts(matrix: DMatrix<f64>, terms: Vec<String>) -> Self {
        debug_assert_eq!(matrix.ncols(), terms.len());
        Self { matrix, terms }
    }

    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn row(&self, i: usize) -> Vec<f64> {
        self.matrix.row(i).iter().copied().collect()
    }
}

/// Train/test partition of a sample set.
#[derive(Debug, Clone)]
pub struct Split {
    pub train: SampleSet,
    pub test: SampleSet,
}

/// Synthetic data generator settings.
///
/// Samples follow `y = a·x² + b·x + c + N(0, noise_std)` with
/// `x ~ Uniform[x_min, x_max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub n_samples: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub noise_std: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_samples: 100,
            x_min: -5.0,
            x_max: 5.0,
            a: 0.5,
            b: 2.0,
            c: 10.0,
            noise_std: 3.0,
            seed: 42,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub generator: GeneratorConfig,
    pub test_fraction: f64,
    pub split_seed: u64,
    /// Degrees to fit. `fit` uses exactly one, `sweep` any number.
    pub degrees: Vec<i32>,
    pub export_model: Option<PathBuf>,
}

/// Train and test metrics for one fitted degree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub train: Metrics,
    pub test: Metrics,
}

/// A saved model file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub degree: i32,
    pub input_dim: usize,
    pub include_bias: bool,
    pub terms: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<FitQuality>,
}
