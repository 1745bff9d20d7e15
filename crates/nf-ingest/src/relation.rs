//! CSV relation loading.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use nf_model::{Relation, Row};

use crate::error::{IngestError, Result};

/// Reads a CSV file with a header row into a relation named after the file stem.
///
/// Header names and values are trimmed and a leading byte-order mark is
/// dropped. Every data row must have one value per header column.
pub fn read_relation(path: &Path) -> Result<Relation> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| csv_error(path, source))?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut rows: Vec<Row> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| csv_error(path, source))?;
        if record.len() != headers.len() {
            return Err(IngestError::RaggedRow {
                path: path.to_path_buf(),
                row: index + 1,
                expected: headers.len(),
                found: record.len(),
            });
        }
        rows.push(record.iter().map(|value| value.trim().to_string()).collect());
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "relation".to_string());
    debug!(
        path = %path.display(),
        relation = %name,
        columns = headers.len(),
        rows = rows.len(),
        "loaded relation"
    );
    Relation::new(name, headers)
        .and_then(|relation| relation.with_rows(rows))
        .map_err(|source| IngestError::Relation {
            path: path.to_path_buf(),
            source,
        })
}

fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    if let csv::ErrorKind::Io(io) = source.kind()
        && io.kind() == std::io::ErrorKind::NotFound
    {
        return IngestError::FileNotFound {
            path: path.to_path_buf(),
        };
    }
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}
