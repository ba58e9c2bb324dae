//! Polynomial basis terms.
//!
//! A term is a monomial `x0^e0 · x1^e1 · … · x{k-1}^e{k-1}`, stored as its
//! exponent vector. Terms are enumerated in graded order:
//!
//! - by total degree (0 when a bias term is wanted, then 1, 2, …, d)
//! - within one total degree, as combinations with repetition of the variable
//!   indices, in lexicographic order
//!
//! For one variable this is simply `[x, x², …, x^d]`. For two variables and
//! `d = 2`: `[x0, x1, x0², x0 x1, x1²]`.

/// Exponent vectors of every monomial of `dim` variables with total degree
/// `1..=degree` (or `0..=degree` when `include_bias`).
pub fn monomial_exponents(dim: usize, degree: usize, include_bias: bool) -> Vec<Vec<u32>> {
    let mut out = Vec::with_capacity(term_count(dim, degree, include_bias));
    let start = if include_bias { 0 } else { 1 };

    for total in start..=degree {
        let mut indices = Vec::with_capacity(total);
        push_combinations(dim, total, 0, &mut indices, &mut out);
    }

    out
}

/// Number of terms produced by `monomial_exponents`: `C(dim + degree, degree)`,
/// minus one without the bias term.
pub fn term_count(dim: usize, degree: usize, include_bias: bool) -> usize {
    checked_term_count(dim, degree, include_bias).unwrap_or(usize::MAX)
}

/// `term_count`, or `None` when the count does not fit in `usize`.
pub fn checked_term_count(dim: usize, degree: usize, include_bias: bool) -> Option<usize> {
    let all = binomial(dim.checked_add(degree)?, degree)?;
    Some(if include_bias { all } else { all.saturating_sub(1) })
}

/// Evaluate one monomial at `x`.
///
/// `x` and `exponents` must have the same length.
pub fn evaluate_term(x: &[f64], exponents: &[u32]) -> f64 {
    x.iter()
        .zip(exponents.iter())
        .filter(|(_, e)| **e > 0)
        .map(|(&xi, &e)| xi.powi(e as i32))
        .product()
}

/// Human-readable label: `1`, `x^3`, `x0 x1^2`, …
///
/// Single-variable terms use `x`; multivariate terms use `x0`, `x1`, ….
pub fn term_label(exponents: &[u32]) -> String {
    let scalar = exponents.len() == 1;
    let parts: Vec<String> = exponents
        .iter()
        .enumerate()
        .filter(|(_, e)| **e > 0)
        .map(|(i, &e)| {
            let name = if scalar { "x".to_string() } else { format!("x{i}") };
            if e == 1 { name } else { format!("{name}^{e}") }
        })
        .collect();

    if parts.is_empty() {
        "1".to_string()
    } else {
        parts.join(" ")
    }
}

fn push_combinations(dim: usize, remaining: usize, first: usize, indices: &mut Vec<usize>, out: &mut Vec<Vec<u32>>) {
    if remaining == 0 {
        let mut exps = vec![0u32; dim];
        for &i in indices.iter() {
            exps[i] += 1;
        }
        out.push(exps);
        return;
    }

    for i in first..dim {
        indices.push(i);
        push_combinations(dim, remaining - 1, i, indices, out);
        indices.pop();
    }
}

fn binomial(n: usize, k: usize) -> Option<usize> {
    let k = k.min(n - k);
    let mut acc: usize = 1;
    for i in 0..k {
        // Exact at every step: acc * (n - i) is divisible by (i + 1).
        acc = acc.checked_mul(n - i)? / (i + 1);
    }
    Some(acc)
}
