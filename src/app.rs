//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - runs the fit pipeline
//! - prints reports
//! - writes optional exports

use std::path::Path;

use clap::Parser;
use env_logger::Env;
use log::info;

use crate::cli::{Command, DataArgs, FitArgs, PredictArgs, SweepArgs};
use crate::domain::{GeneratorConfig, ModelFile, RunConfig};
use crate::error::AppError;
use crate::fit::DegreeFit;

pub mod pipeline;

/// Entry point for the `polyreg` binary.
pub fn run() -> Result<(), AppError> {
    // Loaded before parsing so `.env` values feed clap's `env` fallbacks.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Predict(args) => handle_predict(args),
    }
}

fn init_logging() {
    // `RUST_LOG` overrides; a second init (e.g. in tests) is harmless.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn")).try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.data, vec![args.degree], args.export_model.clone());
    let run = pipeline::run_fit(&config)?;
    let best = run.sweep.best();

    println!(
        "{}",
        crate::report::format_run_summary(&run.samples.stats(), run.split.train.len(), run.split.test.len(), best, &config)
    );

    if args.top > 0 {
        let residuals = crate::report::compute_residuals(&run.split.test, &best.fitted)?;
        let worst = crate::report::largest_residuals(&residuals, args.top);
        println!("Largest test residuals:");
        println!("{}", crate::report::format_residuals(&worst));
    }

    export_if_requested(config.export_model.as_deref(), best)
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.data, args.degrees.clone(), args.export_model.clone());
    let run = pipeline::run_fit(&config)?;
    let best = run.sweep.best();

    println!(
        "{}",
        crate::report::format_run_summary(&run.samples.stats(), run.split.train.len(), run.split.test.len(), best, &config)
    );
    println!("Degree sweep (* = lowest test RMSE):");
    println!("{}", crate::report::format_sweep(&run.sweep));

    export_if_requested(config.export_model.as_deref(), best)
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let file = crate::io::read_model_json(&args.model)?;
    info!("loaded degree {} model from {}", file.degree, args.model.display());
    let predictor = file.into_predictor()?;

    let rows = args
        .x
        .iter()
        .map(|s| parse_input(s))
        .collect::<Result<Vec<_>, _>>()?;
    let predictions = predictor.predict(&rows)?;

    println!("{}", crate::report::format_predictions(&rows, &predictions));
    Ok(())
}

fn export_if_requested(path: Option<&Path>, fit: &DegreeFit) -> Result<(), AppError> {
    if let Some(path) = path {
        let file = ModelFile::from_fit(&fit.fitted, Some(fit.quality.clone()));
        crate::io::write_model_json(path, &file)?;
        info!("wrote degree {} model to {}", fit.degree, path.display());
    }
    Ok(())
}

pub fn run_config_from_args(data: &DataArgs, degrees: Vec<i32>, export_model: Option<std::path::PathBuf>) -> RunConfig {
    RunConfig {
        generator: GeneratorConfig {
            n_samples: data.samples,
            x_min: data.x_min,
            x_max: data.x_max,
            a: data.a,
            b: data.b,
            c: data.c,
            noise_std: data.noise,
            seed: data.seed,
        },
        test_fraction: data.test_fraction,
        split_seed: data.split_seed,
        degrees,
        export_model,
    }
}

/// Parse one `--x` value: a scalar (`1.5`) or a comma-separated vector (`1,2`).
fn parse_input(s: &str) -> Result<Vec<f64>, AppError> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| AppError::new(2, format!("Invalid input value '{part}' in '{s}': {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_input_scalar_and_vector() {
        assert_eq!(parse_input("1.5").unwrap(), vec![1.5]);
        assert_eq!(parse_input("-1, 2").unwrap(), vec![-1.0, 2.0]);
        assert_eq!(parse_input("abc").unwrap_err().exit_code(), 2);
        assert_eq!(parse_input("1,").unwrap_err().exit_code(), 2);
    }

    #[test]
    fn config_from_args_maps_every_field() {
        let cli = crate::cli::Cli::parse_from(["polyreg", "fit", "-n", "40", "--noise", "0.5", "--seed", "9"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let config = run_config_from_args(&args.data, vec![args.degree], None);
        assert_eq!(config.generator.n_samples, 40);
        assert_eq!(config.generator.noise_std, 0.5);
        assert_eq!(config.generator.seed, 9);
        assert_eq!(config.degrees, vec![2]);
    }
}
