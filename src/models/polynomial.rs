//! Polynomial regression: feature expansion followed by least squares.
//!
//! Two ways to use it:
//!
//! - `fit_polynomial` returns an immutable `FittedPolynomialModel` value
//! - `PolynomialRegression` is an estimator object that keeps its last
//!   successful fit, for callers that want fit/predict on one handle
//!
//! Both place the constant term in the regression intercept, never in the
//! design matrix.

use crate::domain::{DesignMatrix, SampleSet};
use crate::error::{RegressionError, RegressionResult};
use crate::math::Metrics;
use crate::models::features::{FittedPolynomialFeatures, PolynomialFeatures};
use crate::models::linear::{LinearModel, LinearRegression};

/// Fitted expander + fitted linear model.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPolynomialModel {
    pub features: FittedPolynomialFeatures,
    pub model: LinearModel,
}

impl FittedPolynomialModel {
    /// Pair an expander with parameters, checking they agree on the term count.
    pub fn from_parts(features: FittedPolynomialFeatures, model: LinearModel) -> RegressionResult<Self> {
        if features.n_output_features() != model.n_features() {
            return Err(RegressionError::invalid(format!(
                "expander produces {} terms but model has {} coefficients",
                features.n_output_features(),
                model.n_features()
            )));
        }
        Ok(Self { features, model })
    }

    pub fn degree(&self) -> usize {
        self.features.degree()
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> RegressionResult<DesignMatrix> {
        self.features.transform(rows)
    }

    pub fn predict(&self, rows: &[Vec<f64>]) -> RegressionResult<Vec<f64>> {
        let design = self.features.transform(rows)?;
        self.model.predict(&design)
    }

    pub fn predict_samples(&self, samples: &SampleSet) -> RegressionResult<Vec<f64>> {
        self.predict(samples.xs())
    }

    pub fn evaluate(&self, samples: &SampleSet) -> RegressionResult<Metrics> {
        let y_pred = self.predict_samples(samples)?;
        Metrics::evaluate(samples.ys(), &y_pred)
    }

    /// `(term, coefficient)` pairs in design column order.
    pub fn coefficients_by_term(&self) -> Vec<(String, f64)> {
        self.features
            .terms()
            .iter()
            .cloned()
            .zip(self.model.coefficients().iter().copied())
            .collect()
    }
}

/// Fit a degree-`degree` polynomial regression on `samples`.
///
/// The expander is fitted on these samples only.
pub fn fit_polynomial(degree: i32, samples: &SampleSet) -> RegressionResult<FittedPolynomialModel> {
    fit_with(&PolynomialFeatures::new(degree)?, &LinearRegression::new(), samples)
}

fn fit_with(
    features: &PolynomialFeatures,
    regression: &LinearRegression,
    samples: &SampleSet,
) -> RegressionResult<FittedPolynomialModel> {
    let fitted_features = features.fit(samples);
    let design = fitted_features.transform_samples(samples)?;
    let model = regression.fit(&design, samples.ys())?;
    Ok(FittedPolynomialModel {
        features: fitted_features,
        model,
    })
}

/// Polynomial regression estimator.
///
/// A failed `fit` leaves the previous fit (if any) in place.
#[derive(Debug, Clone)]
pub struct PolynomialRegression {
    features: PolynomialFeatures,
    regression: LinearRegression,
    fitted: Option<FittedPolynomialModel>,
}

impl PolynomialRegression {
    pub fn new(degree: i32) -> RegressionResult<Self> {
        Ok(Self {
            features: PolynomialFeatures::new(degree)?,
            regression: LinearRegression::new(),
            fitted: None,
        })
    }

    pub fn degree(&self) -> usize {
        self.features.degree()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn fit(&mut self, samples: &SampleSet) -> RegressionResult<&FittedPolynomialModel> {
        let fitted = fit_with(&self.features, &self.regression, samples)?;
        self.fitted = Some(fitted);
        self.fitted()
    }

    pub fn fitted(&self) -> RegressionResult<&FittedPolynomialModel> {
        self.fitted
            .as_ref()
            .ok_or_else(|| RegressionError::not_fitted("call fit before using the model"))
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> RegressionResult<DesignMatrix> {
        self.fitted()?.transform(rows)
    }

    pub fn predict(&self, rows: &[Vec<f64>]) -> RegressionResult<Vec<f64>> {
        self.fitted()?.predict(rows)
    }

    pub fn intercept(&self) -> RegressionResult<f64> {
        Ok(self.fitted()?.model.intercept())
    }

    pub fn coefficients(&self) -> RegressionResult<&[f64]> {
        Ok(self.fitted()?.model.coefficients())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_samples, train_test_split};
    use crate::domain::GeneratorConfig;

    fn scenario_samples() -> SampleSet {
        let xs = [-5.0, -2.5, 0.0, 2.5, 5.0];
        let ys: Vec<f64> = xs.iter().map(|x| 0.5 * x * x + 2.0 * x + 10.0).collect();
        SampleSet::from_scalar(&xs, &ys).unwrap()
    }

    #[test]
    fn degree_two_recovers_generating_polynomial() {
        let fit = fit_polynomial(2, &scenario_samples()).unwrap();
        assert!((fit.model.intercept() - 10.0).abs() < 1e-6);
        let coefs = fit.model.coefficients();
        assert!((coefs[0] - 2.0).abs() < 1e-6);
        assert!((coefs[1] - 0.5).abs() < 1e-6);

        let at_zero = fit.predict(&[vec![0.0]]).unwrap();
        assert!((at_zero[0] - 10.0).abs() < 1e-6);

        let terms: Vec<String> = fit.coefficients_by_term().into_iter().map(|(t, _)| t).collect();
        assert_eq!(terms, vec!["x", "x^2"]);
    }

    #[test]
    fn higher_degree_on_noise_free_data_zeroes_extra_terms() {
        let config = GeneratorConfig {
            n_samples: 30,
            noise_std: 0.0,
            ..GeneratorConfig::default()
        };
        let samples = generate_samples(&config).unwrap();

        let fit = fit_polynomial(4, &samples).unwrap();
        let coefs = fit.model.coefficients();
        assert!((fit.model.intercept() - 10.0).abs() < 1e-6);
        assert!((coefs[0] - 2.0).abs() < 1e-6);
        assert!((coefs[1] - 0.5).abs() < 1e-6);
        assert!(coefs[2].abs() < 1e-6);
        assert!(coefs[3].abs() < 1e-6);

        let m = fit.evaluate(&samples).unwrap();
        assert!((m.r2 - 1.0).abs() < 1e-9);
        assert!(m.rmse < 1e-6);
    }

    #[test]
    fn predict_twice_is_identical() {
        let fit = fit_polynomial(3, &scenario_samples()).unwrap();
        let rows = vec![vec![-1.0], vec![0.25], vec![7.5]];
        assert_eq!(fit.predict(&rows).unwrap(), fit.predict(&rows).unwrap());
    }

    #[test]
    fn estimator_requires_fit_first() {
        let est = PolynomialRegression::new(2).unwrap();
        assert!(!est.is_fitted());
        assert!(matches!(est.predict(&[vec![1.0]]), Err(RegressionError::NotFitted(_))));
        assert!(matches!(est.transform(&[vec![1.0]]), Err(RegressionError::NotFitted(_))));
        assert!(matches!(est.intercept(), Err(RegressionError::NotFitted(_))));
        assert!(matches!(est.coefficients(), Err(RegressionError::NotFitted(_))));
    }

    #[test]
    fn failed_refit_keeps_previous_parameters() {
        let mut est = PolynomialRegression::new(2).unwrap();
        est.fit(&scenario_samples()).unwrap();
        let before = est.fitted().unwrap().clone();

        // Every input is zero, so every polynomial column is zero.
        let degenerate = SampleSet::from_scalar(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]).unwrap();
        let err = est.fit(&degenerate).unwrap_err();
        assert!(matches!(err, RegressionError::NumericalInstability(_)));

        assert_eq!(est.fitted().unwrap(), &before);
        assert!((est.intercept().unwrap() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn estimator_rejects_test_rows_of_other_dimension() {
        let mut est = PolynomialRegression::new(2).unwrap();
        est.fit(&scenario_samples()).unwrap();
        let err = est.predict(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, RegressionError::InvalidArgument(_)));
    }

    #[test]
    fn vector_inputs_fit_plane_with_interaction() {
        // y = 1 + x0 - 2 x1 + 3 x0 x1
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                let (a, b) = (i as f64 - 2.0, j as f64 * 0.5);
                xs.push(vec![a, b]);
                ys.push(1.0 + a - 2.0 * b + 3.0 * a * b);
            }
        }
        let samples = SampleSet::new(xs, ys).unwrap();
        let fit = fit_polynomial(2, &samples).unwrap();

        let by_term: Vec<(String, f64)> = fit.coefficients_by_term();
        let expect = [("x0", 1.0), ("x1", -2.0), ("x0^2", 0.0), ("x0 x1", 3.0), ("x1^2", 0.0)];
        for ((term, coef), (want_term, want)) in by_term.iter().zip(expect.iter()) {
            assert_eq!(term, want_term);
            assert!((coef - want).abs() < 1e-8, "{term}: {coef} vs {want}");
        }
        assert!((fit.model.intercept() - 1.0).abs() < 1e-8);
    }

    #[test]
    fn high_degree_overfits_held_out_data() {
        // Averaged over seeds so one lucky split can't hide the gap.
        let mut train_rmse = 0.0;
        let mut test_rmse = 0.0;
        let seeds = 30u64;
        for seed in 0..seeds {
            let config = GeneratorConfig {
                seed,
                ..GeneratorConfig::default()
            };
            let samples = generate_samples(&config).unwrap();
            let split = train_test_split(&samples, 0.2, seed).unwrap();
            let fit = fit_polynomial(10, &split.train).unwrap();
            train_rmse += fit.evaluate(&split.train).unwrap().rmse;
            test_rmse += fit.evaluate(&split.test).unwrap().rmse;
        }
        train_rmse /= seeds as f64;
        test_rmse /= seeds as f64;
        assert!(
            test_rmse > 1.05 * train_rmse,
            "expected overfitting gap: train={train_rmse:.4} test={test_rmse:.4}"
        );
    }
}
