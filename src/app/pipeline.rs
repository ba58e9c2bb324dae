//! Shared "fit pipeline" logic used by the `fit` and `sweep` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! sample generation -> split -> fit each degree on train -> score train/test
//!
//! The commands can then focus on presentation.

use log::info;

use crate::data::{generate_samples, train_test_split};
use crate::domain::{RunConfig, SampleSet, Split};
use crate::error::AppError;
use crate::fit::{DegreeSweep, sweep_degrees};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub samples: SampleSet,
    pub split: Split,
    pub sweep: DegreeSweep,
}

/// Execute the full pipeline on freshly generated samples.
pub fn run_fit(config: &RunConfig) -> Result<RunOutput, AppError> {
    let samples = generate_samples(&config.generator)?;
    info!(
        "generated {} samples (seed {}, noise {})",
        samples.len(),
        config.generator.seed,
        config.generator.noise_std
    );

    run_fit_with_samples(config, samples)
}

/// Execute the pipeline on samples from any source.
///
/// The generator settings in `config` are ignored.
pub fn run_fit_with_samples(config: &RunConfig, samples: SampleSet) -> Result<RunOutput, AppError> {
    let split = train_test_split(&samples, config.test_fraction, config.split_seed)?;
    info!("split: train={} test={}", split.train.len(), split.test.len());

    let sweep = sweep_degrees(&split, &config.degrees)?;

    Ok(RunOutput { samples, split, sweep })
}
