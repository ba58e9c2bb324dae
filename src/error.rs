//! Error types.
//!
//! - `RegressionError`: typed failures of the numerical core (library API)
//! - `AppError`: exit code + message, used by the binary and the I/O layer
//!
//! Exit codes:
//! - `2`: invalid input or configuration (including file I/O)
//! - `3`: estimator used before it was fitted
//! - `4`: numerical failure

use thiserror::Error;

pub type RegressionResult<T> = Result<T, RegressionError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not fitted: {0}")]
    NotFitted(String),
    #[error("numerical instability: {0}")]
    NumericalInstability(String),
}

impl RegressionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RegressionError::InvalidArgument(message.into())
    }

    pub fn not_fitted(message: impl Into<String>) -> Self {
        RegressionError::NotFitted(message.into())
    }

    pub fn numerical(message: impl Into<String>) -> Self {
        RegressionError::NumericalInstability(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            RegressionError::InvalidArgument(_) => 2,
            RegressionError::NotFitted(_) => 3,
            RegressionError::NumericalInstability(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<RegressionError> for AppError {
    fn from(err: RegressionError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regression_errors_map_to_exit_codes() {
        let cases = [
            (RegressionError::invalid("bad degree"), 2),
            (RegressionError::not_fitted("predict"), 3),
            (RegressionError::numerical("all-zero design"), 4),
        ];
        for (err, code) in cases {
            let app: AppError = err.clone().into();
            assert_eq!(app.exit_code(), code);
            assert_eq!(app.to_string(), err.to_string());
        }
    }
}
