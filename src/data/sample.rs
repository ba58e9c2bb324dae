//! Synthetic quadratic sample generation.
//!
//! Samples follow `y = a·x² + b·x + c + ε` with `x ~ Uniform[x_min, x_max]` and
//! `ε ~ N(0, noise_std)`. The RNG is seeded from the config, so the same config
//! always produces the same samples.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{GeneratorConfig, SampleSet};
use crate::error::{RegressionError, RegressionResult};

pub fn generate_samples(config: &GeneratorConfig) -> RegressionResult<SampleSet> {
    if config.n_samples == 0 {
        return Err(RegressionError::invalid("sample count must be > 0"));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(RegressionError::invalid(format!(
            "invalid x range [{}, {}]",
            config.x_min, config.x_max
        )));
    }
    if !(config.a.is_finite() && config.b.is_finite() && config.c.is_finite()) {
        return Err(RegressionError::invalid("polynomial coefficients must be finite"));
    }
    if !(config.noise_std.is_finite() && config.noise_std >= 0.0) {
        return Err(RegressionError::invalid(format!(
            "noise standard deviation must be finite and >= 0, got {}",
            config.noise_std
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_std)
        .map_err(|e| RegressionError::invalid(format!("noise distribution error: {e}")))?;

    let mut xs = Vec::with_capacity(config.n_samples);
    let mut ys = Vec::with_capacity(config.n_samples);

    for _ in 0..config.n_samples {
        let x = rng.gen_range(config.x_min..=config.x_max);
        // Always draw, so x values don't depend on whether noise is enabled.
        let noise = normal.sample(&mut rng);
        xs.push(vec![x]);
        ys.push(quadratic(config, x) + noise);
    }

    SampleSet::new(xs, ys)
}

/// Noise-free generating curve.
pub fn quadratic(config: &GeneratorConfig, x: f64) -> f64 {
    config.a * x * x + config.b * x + config.c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_samples() {
        let config = GeneratorConfig::default();
        let a = generate_samples(&config).unwrap();
        let b = generate_samples(&config).unwrap();

        assert_eq!(a.len(), 100);
        let bits = |s: &SampleSet| -> Vec<u64> {
            s.xs()
                .iter()
                .flatten()
                .chain(s.ys().iter())
                .map(|v| v.to_bits())
                .collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn different_seed_different_samples() {
        let a = generate_samples(&GeneratorConfig::default()).unwrap();
        let b = generate_samples(&GeneratorConfig {
            seed: 7,
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert_ne!(a.ys(), b.ys());
    }

    #[test]
    fn samples_stay_in_range() {
        let config = GeneratorConfig {
            n_samples: 500,
            x_min: -1.0,
            x_max: 2.0,
            ..GeneratorConfig::default()
        };
        let s = generate_samples(&config).unwrap();
        assert!(s.xs().iter().all(|x| x[0] >= -1.0 && x[0] <= 2.0));
        assert_eq!(s.dim(), 1);
    }

    #[test]
    fn zero_noise_lies_on_curve() {
        let config = GeneratorConfig {
            noise_std: 0.0,
            ..GeneratorConfig::default()
        };
        let s = generate_samples(&config).unwrap();
        for (x, y) in s.xs().iter().zip(s.ys().iter()) {
            assert!((quadratic(&config, x[0]) - y).abs() < 1e-12);
        }
    }

    #[test]
    fn noise_has_roughly_configured_scale() {
        let config = GeneratorConfig {
            n_samples: 4000,
            noise_std: 2.0,
            ..GeneratorConfig::default()
        };
        let s = generate_samples(&config).unwrap();
        let resid: Vec<f64> = s
            .xs()
            .iter()
            .zip(s.ys().iter())
            .map(|(x, y)| y - quadratic(&config, x[0]))
            .collect();
        let mean = resid.iter().sum::<f64>() / resid.len() as f64;
        let var = resid.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / resid.len() as f64;
        assert!(mean.abs() < 0.2, "mean={mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.2, "std={}", var.sqrt());
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let bad = [
            GeneratorConfig {
                n_samples: 0,
                ..GeneratorConfig::default()
            },
            GeneratorConfig {
                x_min: 1.0,
                x_max: 1.0,
                ..GeneratorConfig::default()
            },
            GeneratorConfig {
                noise_std: -1.0,
                ..GeneratorConfig::default()
            },
            GeneratorConfig {
                a: f64::NAN,
                ..GeneratorConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(
                generate_samples(&config),
                Err(RegressionError::InvalidArgument(_))
            ));
        }
    }
}
