//! Restaurant Inspections
//!
//! A single-pass ETL tool that normalizes restaurant inspection CSV exports
//! into per-table SQL insert scripts

pub mod cli;
pub mod config;
pub mod error;
pub mod etl;
pub mod fields;
pub mod model;
pub mod sql;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use config::Config;
pub use error::Error;
pub use etl::{Extractor, Loader, Pipeline, PipelineReport, Transformer};
pub use model::{RawRecord, Snapshot};
pub use storage::{CsvReader, OutputManifest, SqlFileWriter};
pub use transform::{InspectionTransformer, TransformStats};
