//! Error types for loading relations and dependency files.

use std::path::PathBuf;

use nf_model::NormalizeError;
use thiserror::Error;

/// Errors raised while reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Input file exists but could not be read.
    #[error("failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// The CSV reader rejected the file.
    #[error("failed to parse CSV {}: {source}", path.display())]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The CSV file has no header row.
    #[error("CSV file has no header: {}", path.display())]
    EmptyCsv { path: PathBuf },

    /// A data row does not have one value per header column.
    #[error("row {row} of {} has {found} values, expected {expected}", path.display())]
    RaggedRow {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    // === Declaration Errors ===
    /// A line of a dependency file is malformed.
    #[error("{}:{line}: {source}", path.display())]
    Declaration {
        path: PathBuf,
        line: usize,
        #[source]
        source: NormalizeError,
    },

    /// The loaded data does not form a valid relation.
    #[error("invalid relation in {}: {source}", path.display())]
    Relation {
        path: PathBuf,
        #[source]
        source: NormalizeError,
    },

    /// A key hint could not be parsed.
    #[error("invalid key hint '{input}': {reason}")]
    KeyHint { input: String, reason: String },
}

impl IngestError {
    /// Model error underlying this failure, if any.
    pub fn model_error(&self) -> Option<&NormalizeError> {
        match self {
            IngestError::Declaration { source, .. } | IngestError::Relation { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
