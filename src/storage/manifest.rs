//! Output manifest listing the generated SQL scripts
//!
//! Example `manifest.json`:
//! ```json
//! {
//!   "tables": [
//!     { "table": "Cuisine", "file": "insert_cuisine.sql", "rows": 84 },
//!     { "table": "InspectionType", "file": "insert_inspectiontype.sql", "rows": 34 }
//!   ]
//! }
//! ```

use crate::error::Error;
use crate::sql::Table;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One generated script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableEntry {
    pub table: String,
    pub file: String,
    pub rows: usize,
}

/// Tables written by a run, in load order
///
/// Holds no timestamps, so identical runs produce identical manifests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputManifest {
    pub tables: Vec<TableEntry>,
}

impl OutputManifest {
    pub const FILE_NAME: &'static str = "manifest.json";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a written table
    pub fn add(&mut self, table: Table, rows: usize) {
        self.tables.push(TableEntry {
            table: table.name().to_string(),
            file: table.file_name(),
            rows,
        });
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    /// Read manifest from JSON file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read output manifest: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse output manifest: {}", path.display()))
    }

    /// Write manifest to JSON file
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .with_context(|| "Failed to serialize output manifest")?;

        std::fs::write(path, format!("{}\n", json)).map_err(|e| Error::write(path, e))?;
        Ok(())
    }
}
