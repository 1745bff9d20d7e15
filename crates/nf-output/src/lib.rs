//! Reporting for normalization results.
//!
//! - **SQL**: `CREATE TABLE` statements whose column types are inferred
//!   from the projected rows
//! - **JSON**: the full [`Outcome`](nf_engine::Outcome) for machine consumers

mod error;
mod sql;
mod types;

use std::fs;
use std::path::Path;

use nf_engine::Outcome;

pub use error::{OutputError, Result};
pub use sql::{render_create_table, render_decomposition, render_outcome};
pub use types::{ColumnType, DEFAULT_VARCHAR_LENGTH, infer_column_type};

/// Pretty-printed JSON for an outcome.
pub fn to_json(outcome: &Outcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Writes rendered output to `path`, replacing any existing file.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
