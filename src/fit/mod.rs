//! Fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit one degree on a split and score train/test (`fitter`)
//! - sweep several degrees in parallel and pick the best by test RMSE (`selection`)

pub mod fitter;
pub mod selection;

pub use fitter::*;
pub use selection::*;
