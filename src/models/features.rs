//! Polynomial feature expansion.
//!
//! `PolynomialFeatures` is the unfitted configuration (degree + bias flag).
//! Fitting it records the input dimensionality and the term structure, and
//! returns an immutable `FittedPolynomialFeatures`. All later inputs (test
//! rows, out-of-sample points) go through `transform` on that value, so the
//! term order can never drift between train and test.

use nalgebra::DMatrix;

use crate::domain::{DesignMatrix, SampleSet};
use crate::error::{RegressionError, RegressionResult};
use crate::math::{evaluate_term, monomial_exponents, term_label};

/// Unfitted polynomial expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialFeatures {
    degree: usize,
    include_bias: bool,
}

impl PolynomialFeatures {
    /// Expander of the given degree, without a bias column.
    ///
    /// Negative degrees are rejected.
    pub fn new(degree: i32) -> RegressionResult<Self> {
        if degree < 0 {
            return Err(RegressionError::invalid(format!("degree must be >= 0, got {degree}")));
        }
        Ok(Self {
            degree: degree as usize,
            include_bias: false,
        })
    }

    /// Include the constant `1` column as the first term.
    ///
    /// Leave this off when the fitter estimates its own intercept; having both
    /// makes the constant column and the intercept compete for the same effect.
    pub fn with_bias(mut self, include_bias: bool) -> Self {
        self.include_bias = include_bias;
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn include_bias(&self) -> bool {
        self.include_bias
    }

    /// Record the term structure for the sample set's input dimensionality.
    pub fn fit(&self, samples: &SampleSet) -> FittedPolynomialFeatures {
        FittedPolynomialFeatures::with_structure(self.degree, self.include_bias, samples.dim())
    }

    /// Record the term structure from raw input rows.
    pub fn fit_rows(&self, rows: &[Vec<f64>]) -> RegressionResult<FittedPolynomialFeatures> {
        let Some(first) = rows.first() else {
            return Err(RegressionError::invalid("cannot fit polynomial features on zero rows"));
        };
        let dim = first.len();
        if dim == 0 {
            return Err(RegressionError::invalid("inputs must have at least one dimension"));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != dim) {
            return Err(RegressionError::invalid(format!(
                "row {i} has dimension {}, expected {dim}",
                row.len()
            )));
        }
        Ok(FittedPolynomialFeatures::with_structure(self.degree, self.include_bias, dim))
    }
}

/// Fitted polynomial expander: a fixed, ordered list of monomials.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPolynomialFeatures {
    degree: usize,
    include_bias: bool,
    input_dim: usize,
    exponents: Vec<Vec<u32>>,
    terms: Vec<String>,
}

impl FittedPolynomialFeatures {
    pub(crate) fn with_structure(degree: usize, include_bias: bool, input_dim: usize) -> Self {
        let exponents = monomial_exponents(input_dim, degree, include_bias);
        let terms = exponents.iter().map(|e| term_label(e)).collect();
        Self {
            degree,
            include_bias,
            input_dim,
            exponents,
            terms,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn include_bias(&self) -> bool {
        self.include_bias
    }

    /// Dimensionality recorded at fit time.
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Number of design columns produced per row.
    pub fn n_output_features(&self) -> usize {
        self.exponents.len()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn exponents(&self) -> &[Vec<u32>] {
        &self.exponents
    }

    /// Expand one input into its ordered monomials.
    pub fn expand_row(&self, x: &[f64]) -> RegressionResult<Vec<f64>> {
        self.check_input(x)?;
        Ok(self.exponents.iter().map(|e| evaluate_term(x, e)).collect())
    }

    /// Build the design matrix for a batch of inputs.
    pub fn transform(&self, rows: &[Vec<f64>]) -> RegressionResult<DesignMatrix> {
        if rows.is_empty() {
            return Err(RegressionError::invalid("cannot transform zero rows"));
        }
        for row in rows {
            self.check_input(row)?;
        }

        let matrix = DMatrix::from_fn(rows.len(), self.exponents.len(), |i, j| {
            evaluate_term(&rows[i], &self.exponents[j])
        });
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(RegressionError::invalid(format!(
                "degree {} expansion overflowed for the given inputs",
                self.degree
            )));
        }

        Ok(DesignMatrix::from_parts(matrix, self.terms.clone()))
    }

    pub fn transform_samples(&self, samples: &SampleSet) -> RegressionResult<DesignMatrix> {
        self.transform(samples.xs())
    }

    fn check_input(&self, x: &[f64]) -> RegressionResult<()> {
        if x.len() != self.input_dim {
            return Err(RegressionError::invalid(format!(
                "input has dimension {}, expander was fitted on dimension {}",
                x.len(),
                self.input_dim
            )));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(RegressionError::invalid("input contains a missing or non-finite value"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_degree_is_invalid() {
        let err = PolynomialFeatures::new(-1).unwrap_err();
        assert!(matches!(err, RegressionError::InvalidArgument(_)));
    }

    #[test]
    fn scalar_expansion_is_increasing_powers() {
        for d in 1..=6 {
            let fitted = PolynomialFeatures::new(d).unwrap().fit_rows(&[vec![0.0]]).unwrap();
            assert_eq!(fitted.n_output_features(), d as usize);

            let design = fitted.transform(&[vec![2.0], vec![-3.0]]).unwrap();
            assert_eq!(design.ncols(), d as usize);
            for j in 0..d as usize {
                assert_eq!(design.matrix()[(0, j)], 2.0_f64.powi(j as i32 + 1));
                assert_eq!(design.matrix()[(1, j)], (-3.0_f64).powi(j as i32 + 1));
            }
        }
    }

    #[test]
    fn scalar_terms_are_labelled() {
        let fitted = PolynomialFeatures::new(3).unwrap().fit_rows(&[vec![1.0]]).unwrap();
        assert_eq!(fitted.terms(), &["x", "x^2", "x^3"]);

        let with_bias = PolynomialFeatures::new(2)
            .unwrap()
            .with_bias(true)
            .fit_rows(&[vec![1.0]])
            .unwrap();
        assert_eq!(with_bias.terms(), &["1", "x", "x^2"]);
        assert_eq!(with_bias.expand_row(&[3.0]).unwrap(), vec![1.0, 3.0, 9.0]);
    }

    #[test]
    fn vector_expansion_uses_all_monomials() {
        let samples = SampleSet::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], vec![0.0, 0.0]).unwrap();
        let fitted = PolynomialFeatures::new(2).unwrap().with_bias(true).fit(&samples);
        // C(2 + 2, 2) = 6
        assert_eq!(fitted.n_output_features(), 6);
        assert_eq!(
            fitted.expand_row(&[2.0, 3.0]).unwrap(),
            vec![1.0, 2.0, 3.0, 4.0, 6.0, 9.0]
        );
    }

    #[test]
    fn transform_is_consistent_across_calls() {
        let fitted = PolynomialFeatures::new(4).unwrap().fit_rows(&[vec![0.5, 1.5, -1.0]]).unwrap();
        let rows = vec![vec![0.1, 0.2, 0.3], vec![-1.0, 2.0, 0.5]];
        let a = fitted.transform(&rows).unwrap();
        let b = fitted.transform(&rows).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.terms(), fitted.terms());
    }

    #[test]
    fn dimension_mismatch_is_invalid() {
        let fitted = PolynomialFeatures::new(2).unwrap().fit_rows(&[vec![1.0]]).unwrap();
        let err = fitted.transform(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, RegressionError::InvalidArgument(_)));

        let err = PolynomialFeatures::new(2)
            .unwrap()
            .fit_rows(&[vec![1.0], vec![1.0, 2.0]])
            .unwrap_err();
        assert!(matches!(err, RegressionError::InvalidArgument(_)));
    }

    #[test]
    fn degree_zero_without_bias_has_no_columns() {
        let fitted = PolynomialFeatures::new(0).unwrap().fit_rows(&[vec![1.0]]).unwrap();
        assert_eq!(fitted.n_output_features(), 0);
        let design = fitted.transform(&[vec![1.0], vec![2.0]]).unwrap();
        assert_eq!(design.nrows(), 2);
        assert_eq!(design.ncols(), 0);
    }
}
