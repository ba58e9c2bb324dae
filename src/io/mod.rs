//! Input/output helpers.
//!
//! - model JSON read/write (`model`)

pub mod model;

pub use model::*;
