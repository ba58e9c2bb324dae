//! Regression models.
//!
//! - `features`: polynomial feature expansion (fit once, transform many)
//! - `linear`: least squares on a design matrix
//! - `polynomial`: the two combined, as a value or as an estimator object

pub mod features;
pub mod linear;
pub mod polynomial;

pub use features::*;
pub use linear::*;
pub use polynomial::*;
