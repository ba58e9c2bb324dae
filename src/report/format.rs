//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{DatasetStats, GeneratorConfig, RunConfig};
use crate::fit::{DegreeFit, DegreeSweep};
use crate::math::Metrics;
use crate::report::Residual;

/// Format the full run summary (data + split + chosen fit).
pub fn format_run_summary(stats: &DatasetStats, n_train: usize, n_test: usize, fit: &DegreeFit, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== polyreg - Polynomial Regression ===\n");
    out.push_str(&format!("Generator: {}\n", fmt_generator(&config.generator)));
    out.push_str(&format!(
        "Samples: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max
    ));
    out.push_str(&format!(
        "Split: train={n_train} test={n_test} (test fraction {:.2}, seed {})\n",
        config.test_fraction, config.split_seed
    ));

    out.push_str(&format!("\nDegree {} fit:\n", fit.degree));
    out.push_str(&format_coefficients(fit));
    out.push('\n');
    out.push_str(&format_metrics(&fit.quality.train, &fit.quality.test));

    out
}

/// Intercept and one row per term.
pub fn format_coefficients(fit: &DegreeFit) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<16} {:>16}\n", "term", "coefficient"));
    out.push_str(&format!("{:-<16} {:-<16}\n", "", ""));
    out.push_str(&format!("{:<16} {:>16.6}\n", "(intercept)", fit.fitted.model.intercept()));
    for (term, coef) in fit.fitted.coefficients_by_term() {
        out.push_str(&format!("{:<16} {:>16.6}\n", truncate(&term, 16), coef));
    }
    if fit.fitted.model.rank() < fit.fitted.model.n_features() {
        out.push_str(&format!(
            "(rank {} < {} terms: minimum-norm coefficients)\n",
            fit.fitted.model.rank(),
            fit.fitted.model.n_features()
        ));
    }
    out
}

/// Train vs test metrics side by side.
pub fn format_metrics(train: &Metrics, test: &Metrics) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:>12} {:>12} {:>10}\n", "", "MSE", "RMSE", "R2"));
    out.push_str(&format!("{:<8} {:>12.4} {:>12.4} {:>10.4}\n", "train", train.mse, train.rmse, train.r2));
    out.push_str(&format!("{:<8} {:>12.4} {:>12.4} {:>10.4}\n", "test", test.mse, test.rmse, test.r2));
    out
}

/// Per-degree table; `*` marks the selected degree.
pub fn format_sweep(sweep: &DegreeSweep) -> String {
    let best = sweep.best_index();
    let mut out = String::new();

    out.push_str(
        format!(
            "  {:>6} {:>12} {:>12} {:>10} {:>10} {:>10}\n",
            "degree", "train RMSE", "test RMSE", "train R2", "test R2", "gap"
        )
        .as_str(),
    );
    out.push_str(format!("  {:-<6} {:-<12} {:-<12} {:-<10} {:-<10} {:-<10}\n", "", "", "", "", "", "").as_str());

    for (i, fit) in sweep.fits.iter().enumerate() {
        let chosen = if i == best { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:>6} {:>12.4} {:>12.4} {:>10.4} {:>10.4} {:>10.4}\n",
            fit.degree,
            fit.quality.train.rmse,
            fit.quality.test.rmse,
            fit.quality.train.r2,
            fit.quality.test.r2,
            fit.generalization_gap(),
        ));
    }

    out
}

/// Largest residuals table.
pub fn format_residuals(rows: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<20} {:>12} {:>12} {:>12}\n", "x", "y_obs", "y_fit", "residual"));
    out.push_str(&format!("{:-<20} {:-<12} {:-<12} {:-<12}\n", "", "", "", ""));
    for r in rows {
        out.push_str(&format!(
            "{:<20} {:>12.4} {:>12.4} {:>12.4}\n",
            truncate(&fmt_vec(&r.x), 20),
            r.y_obs,
            r.y_fit,
            r.residual
        ));
    }
    out
}

/// Inputs and predictions for `polyreg predict`.
pub fn format_predictions(rows: &[Vec<f64>], predictions: &[f64]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<24} {:>16}\n", "x", "y_pred"));
    out.push_str(&format!("{:-<24} {:-<16}\n", "", ""));
    for (x, y) in rows.iter().zip(predictions.iter()) {
        out.push_str(&format!("{:<24} {:>16.6}\n", truncate(&fmt_vec(x), 24), y));
    }
    out
}

fn fmt_generator(g: &GeneratorConfig) -> String {
    format!(
        "y = {}x^2 + {}x + {} + N(0, {}) | x ~ U[{}, {}] | seed {}",
        g.a, g.b, g.c, g.noise_std, g.x_min, g.x_max, g.seed
    )
}

fn fmt_vec(v: &[f64]) -> String {
    if v.len() == 1 {
        return format!("{:.4}", v[0]);
    }
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.4}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
