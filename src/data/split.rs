//! Seeded train/test partitioning.
//!
//! The sample indices are shuffled with a seeded RNG; the first
//! `ceil(n · test_fraction)` shuffled indices form the test set and the rest
//! the train set. Both sets keep the shuffled order.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::domain::{SampleSet, Split};
use crate::error::{RegressionError, RegressionResult};

pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

pub fn train_test_split(samples: &SampleSet, test_fraction: f64, seed: u64) -> RegressionResult<Split> {
    if !(test_fraction.is_finite() && test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(RegressionError::invalid(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let n = samples.len();
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(RegressionError::invalid(format!(
            "cannot split {n} samples with test fraction {test_fraction}: both sides must be non-empty"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    Ok(Split {
        train: samples.select(train_idx),
        test: samples.select(test_idx),
    })
}
