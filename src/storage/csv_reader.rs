//! CSV source reading

use crate::error::Error;
use crate::etl::Extractor;
use crate::model::RawRecord;

use eyre::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read header-keyed records from a CSV file
///
/// Every call to `records` (or `extract`) reopens the file and starts from the
/// first data row. A ragged row (column count differing from the header) is a
/// fatal `MalformedSource`, never padded.
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open the file and return a lazy record iterator
    ///
    /// # Errors
    /// `SourceNotFound` if the path does not resolve to a file,
    /// `MalformedSource` if the header row cannot be read.
    pub fn records(&self) -> Result<CsvRecords> {
        if !self.path.is_file() {
            return Err(Error::SourceNotFound {
                path: self.path.clone(),
            }
            .into());
        }

        let file = File::open(&self.path).map_err(|e| {
            Error::malformed(&self.path, None, format!("cannot open file: {}", e))
        })?;
        let mut input = BufReader::new(file);
        skip_bom(&mut input).map_err(|e| Error::malformed(&self.path, None, e.to_string()))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(input);

        let columns = reader
            .headers()
            .map_err(|e| malformed(&self.path, e))?
            .len();
        log::debug!(
            "Opened {} with {} columns",
            self.path.display(),
            columns
        );

        Ok(CsvRecords {
            path: self.path.clone(),
            inner: reader.into_deserialize(),
        })
    }
}

/// Lazy iterator over the records of one [`CsvReader`] pass
pub struct CsvRecords {
    path: PathBuf,
    inner: csv::DeserializeRecordsIntoIter<BufReader<File>, RawRecord>,
}

impl Iterator for CsvRecords {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|record| record.map_err(|e| malformed(&self.path, e).into()))
    }
}

impl Extractor for CsvReader {
    type Item = RawRecord;
    type Iter = CsvRecords;

    fn extract(&self) -> Result<Self::Iter> {
        log::info!("Reading records from {}", self.path.display());
        self.records()
    }
}

fn skip_bom(input: &mut impl BufRead) -> std::io::Result<()> {
    if input.fill_buf()?.starts_with(UTF8_BOM) {
        input.consume(UTF8_BOM.len());
    }
    Ok(())
}

fn malformed(path: &Path, error: csv::Error) -> Error {
    let line = error.position().map(|p| p.line());
    let reason = match error.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        csv::ErrorKind::Utf8 { .. } => "invalid UTF-8".to_string(),
        _ => error.to_string(),
    };
    Error::malformed(path, line, reason)
}
