//! Per-table SQL script output

use super::OutputManifest;
use crate::error::Error;
use crate::etl::Loader;
use crate::model::Snapshot;
use crate::sql::{SqlInserts, Table, render_inserts};

use eyre::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write rendered `INSERT` statements as one `.sql` file per table
///
/// Tables are written one after another, each file truncated first; if a
/// write fails, files written before it stay on disk. A `manifest.json`
/// summarizing the tables is written last.
pub struct SqlFileWriter {
    path: PathBuf,
}

impl SqlFileWriter {
    /// Create a writer for `path`; the directory is created on first write
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the file a table is written to
    pub fn table_path(&self, table: Table) -> PathBuf {
        self.path.join(table.file_name())
    }

    /// Write every table's statements, returning the total statement count
    pub fn write_all(&self, inserts: &SqlInserts) -> Result<usize> {
        std::fs::create_dir_all(&self.path)
            .map_err(|e| Error::write(&self.path, e))
            .with_context(|| format!("Failed to create output directory: {}", self.path.display()))?;

        let mut manifest = OutputManifest::new();

        for (table, statements) in inserts.iter() {
            let path = self.table_path(table);
            write_statements(&path, statements)?;
            log::debug!("Wrote {} statements to {}", statements.len(), path.display());
            manifest.add(table, statements.len());
        }

        manifest.write(self.path.join(OutputManifest::FILE_NAME))?;
        Ok(manifest.total_rows())
    }
}

/// Write statements one per line; the handle is closed when this returns
fn write_statements(path: &Path, statements: &[String]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::write(path, e))?;
    let mut writer = BufWriter::new(file);

    for statement in statements {
        writeln!(writer, "{}", statement).map_err(|e| Error::write(path, e))?;
    }

    writer.flush().map_err(|e| Error::write(path, e))?;
    Ok(())
}

// Implement Loader trait for writing SQL scripts

impl Loader for SqlFileWriter {
    type Item = Snapshot;

    fn load(&self, item: &Self::Item) -> Result<usize> {
        let inserts = render_inserts(item);
        log::info!(
            "Writing {} statements to {}",
            inserts.len(),
            self.path.display()
        );
        self.write_all(&inserts)
    }
}
