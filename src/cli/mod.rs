//! Command-line parsing for the polynomial regression tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.
//!
//! Every numeric knob can also be set through a `POLYREG_*` environment
//! variable (or a `.env` file); explicit flags win.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "polyreg",
    version,
    about = "Polynomial regression on synthetic quadratic data",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit one polynomial degree, print coefficients and train/test metrics.
    Fit(FitArgs),
    /// Fit several degrees and compare train/test error to expose overfitting.
    Sweep(SweepArgs),
    /// Predict with a previously exported model JSON.
    Predict(PredictArgs),
}

/// Data generation and split options shared by `fit` and `sweep`.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Number of synthetic samples to generate.
    #[arg(short = 'n', long, env = "POLYREG_SAMPLES", default_value_t = 100)]
    pub samples: usize,

    /// Random seed for sample generation.
    #[arg(long, env = "POLYREG_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Lower bound of the uniform x range.
    #[arg(long, env = "POLYREG_X_MIN", default_value_t = -5.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Upper bound of the uniform x range.
    #[arg(long, env = "POLYREG_X_MAX", default_value_t = 5.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Quadratic coefficient of the generating curve.
    #[arg(long, env = "POLYREG_A", default_value_t = 0.5, allow_hyphen_values = true)]
    pub a: f64,

    /// Linear coefficient of the generating curve.
    #[arg(long, env = "POLYREG_B", default_value_t = 2.0, allow_hyphen_values = true)]
    pub b: f64,

    /// Constant term of the generating curve.
    #[arg(long, env = "POLYREG_C", default_value_t = 10.0, allow_hyphen_values = true)]
    pub c: f64,

    /// Standard deviation of the Gaussian noise added to y.
    #[arg(long, env = "POLYREG_NOISE", default_value_t = 3.0)]
    pub noise: f64,

    /// Fraction of samples held out for testing.
    #[arg(long, env = "POLYREG_TEST_FRACTION", default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Random seed for the train/test permutation.
    #[arg(long, env = "POLYREG_SPLIT_SEED", default_value_t = 42)]
    pub split_seed: u64,
}

/// Options for fitting a single degree.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Polynomial degree.
    #[arg(short = 'd', long, env = "POLYREG_DEGREE", default_value_t = 2, allow_hyphen_values = true)]
    pub degree: i32,

    /// Show the N test samples with the largest residuals.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Export the fitted model (terms + parameters + metrics) to JSON.
    #[arg(long = "export-model", value_name = "JSON")]
    pub export_model: Option<PathBuf>,
}

/// Options for a degree sweep.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Comma-separated degrees to fit.
    #[arg(
        long,
        env = "POLYREG_DEGREES",
        value_delimiter = ',',
        default_value = "1,2,3,5,10",
        allow_hyphen_values = true
    )]
    pub degrees: Vec<i32>,

    /// Export the selected degree's model to JSON.
    #[arg(long = "export-model", value_name = "JSON")]
    pub export_model: Option<PathBuf>,
}

/// Options for predicting with a saved model.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Model JSON file produced by `polyreg fit --export-model`.
    #[arg(long, value_name = "JSON")]
    pub model: PathBuf,

    /// Input to predict; repeat for several. Vector inputs are comma-separated.
    #[arg(long = "x", value_name = "X", required = true, allow_hyphen_values = true)]
    pub x: Vec<String>,
}
