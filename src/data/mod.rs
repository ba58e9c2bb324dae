//! Sample sources and partitioning.
//!
//! - seeded synthetic samples (`sample`)
//! - train/test splitting (`split`)

pub mod sample;
pub mod split;

pub use sample::*;
pub use split::*;
