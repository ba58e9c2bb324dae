//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated observations (`SampleSet`) and their train/test `Split`
//! - the regression input (`DesignMatrix`)
//! - run configuration (`GeneratorConfig`, `RunConfig`)
//! - the portable model file schema (`ModelFile`)

pub mod types;

pub use types::*;
