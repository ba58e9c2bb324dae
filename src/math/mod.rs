//! Mathematical utilities: polynomial basis terms, least squares and metrics.

pub mod basis;
pub mod metrics;
pub mod ols;

pub use basis::*;
pub use metrics::*;
pub use ols::*;
