//! Structural error conditions
//!
//! Field-level problems never surface here: a bad date or an empty column
//! becomes `None` inside the transformer. Only conditions that abort a run
//! (unreadable source, unwritable destination, bad configuration) are modelled.
//!
//! Stage functions return `eyre::Result`, so these values travel wrapped in an
//! `eyre::Report`. Use `report.downcast_ref::<Error>()` to match on them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Malformed source {path}{}: {reason}", .line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    MalformedSource {
        path: PathBuf,
        line: Option<u64>,
        reason: String,
    },

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    pub fn malformed(path: impl Into<PathBuf>, line: Option<u64>, reason: impl Into<String>) -> Self {
        Self::MalformedSource {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
