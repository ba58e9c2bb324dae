//! Read/write model JSON files.
//!
//! A model file is the portable representation of a fitted polynomial model:
//! - expander structure (degree, input dimensionality, bias flag, term labels)
//! - regression parameters (intercept + one coefficient per term)
//! - optional train/test metrics from the run that produced it
//!
//! The schema is defined by `domain::ModelFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{FitQuality, ModelFile};
use crate::error::{AppError, RegressionError, RegressionResult};
use crate::math::checked_term_count;
use crate::models::{FittedPolynomialFeatures, FittedPolynomialModel, LinearModel};

const TOOL_NAME: &str = "polyreg";

impl ModelFile {
    pub fn from_fit(fitted: &FittedPolynomialModel, quality: Option<FitQuality>) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            generated_at: Utc::now(),
            degree: fitted.features.degree() as i32,
            input_dim: fitted.features.input_dim(),
            include_bias: fitted.features.include_bias(),
            terms: fitted.features.terms().to_vec(),
            intercept: fitted.model.intercept(),
            coefficients: fitted.model.coefficients().to_vec(),
            quality,
        }
    }

    /// Rebuild the fitted expander and model.
    ///
    /// Fails if the stored structure and parameters disagree (term count or
    /// labels), so a hand-edited file can't silently shift coefficients.
    pub fn into_predictor(self) -> RegressionResult<FittedPolynomialModel> {
        if self.degree < 0 {
            return Err(RegressionError::invalid(format!("model degree must be >= 0, got {}", self.degree)));
        }
        if self.input_dim == 0 {
            return Err(RegressionError::invalid("model input dimension must be >= 1"));
        }

        // Checked before expanding so an inflated degree can't allocate a huge basis.
        let expected = checked_term_count(self.input_dim, self.degree as usize, self.include_bias);
        if expected != Some(self.coefficients.len()) || expected != Some(self.terms.len()) {
            return Err(RegressionError::invalid(format!(
                "degree {} over {} input(s) does not match {} terms and {} coefficients",
                self.degree,
                self.input_dim,
                self.terms.len(),
                self.coefficients.len()
            )));
        }

        let features = FittedPolynomialFeatures::with_structure(self.degree as usize, self.include_bias, self.input_dim);
        if features.terms() != self.terms.as_slice() {
            return Err(RegressionError::invalid(format!(
                "model terms {:?} do not match degree {} expansion {:?}",
                self.terms,
                self.degree,
                features.terms()
            )));
        }

        let model = LinearModel::from_parts(self.intercept, self.coefficients)?;
        FittedPolynomialModel::from_parts(features, model)
    }
}

/// Write a model JSON file.
pub fn write_model_json(path: &Path, model: &ModelFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create model JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, model)
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

/// Read a model JSON file.
pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let model: ModelFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid model JSON: {e}")))?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SampleSet;
    use crate::models::fit_polynomial;

    fn fitted() -> FittedPolynomialModel {
        let xs = [-3.0, -1.0, 0.0, 1.5, 2.0, 4.0];
        let ys = [7.0, 1.0, 2.5, 3.0, 9.0, 20.0];
        fit_polynomial(3, &SampleSet::from_scalar(&xs, &ys).unwrap()).unwrap()
    }

    #[test]
    fn json_round_trip_predicts_identically() {
        let fit = fitted();
        let path = std::env::temp_dir().join(format!("polyreg-model-{}.json", std::process::id()));

        write_model_json(&path, &ModelFile::from_fit(&fit, None)).unwrap();
        let loaded = read_model_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.tool, "polyreg");
        assert_eq!(loaded.terms, vec!["x", "x^2", "x^3"]);

        let predictor = loaded.into_predictor().unwrap();
        let rows = vec![vec![-2.0], vec![0.5], vec![3.0]];
        assert_eq!(predictor.predict(&rows).unwrap(), fit.predict(&rows).unwrap());
    }

    #[test]
    fn mismatched_coefficients_are_rejected() {
        let mut file = ModelFile::from_fit(&fitted(), None);
        file.coefficients.pop();
        // Terms still match degree 3, coefficients don't.
        let err = file.into_predictor().unwrap_err();
        assert!(matches!(err, RegressionError::InvalidArgument(_)));
    }

    #[test]
    fn mismatched_terms_are_rejected() {
        let mut file = ModelFile::from_fit(&fitted(), None);
        file.degree = 2;
        let err = file.into_predictor().unwrap_err();
        assert!(matches!(err, RegressionError::InvalidArgument(_)));
    }

    #[test]
    fn inflated_structure_is_rejected_before_expansion() {
        let mut file = ModelFile::from_fit(&fitted(), None);
        file.degree = 2_000_000_000;
        let err = file.into_predictor().unwrap_err();
        assert!(matches!(err, RegressionError::InvalidArgument(_)));

        let mut file = ModelFile::from_fit(&fitted(), None);
        file.input_dim = 50_000;
        file.degree = 1_000;
        let err = file.into_predictor().unwrap_err();
        assert!(matches!(err, RegressionError::InvalidArgument(_)));
    }

    #[test]
    fn missing_file_is_app_error() {
        let err = read_model_json(Path::new("/nonexistent/polyreg/model.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
