//! File system storage operations
//!
//! This module handles all file I/O operations:
//! - CSV source reading
//! - Per-table SQL script writing
//! - Output manifest management

mod csv_reader;
mod manifest;
mod sql_files;

pub use csv_reader::{CsvReader, CsvRecords};
pub use manifest::{OutputManifest, TableEntry};
pub use sql_files::SqlFileWriter;
