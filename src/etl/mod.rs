//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building single-pass pipelines
//! that stream records out of a source, fold them into a result, and load
//! that result to a destination.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::{Pipeline, PipelineReport};
pub use transform::Transformer;
