//! Dependency files and key hints.

use std::fs;
use std::path::Path;

use tracing::debug;

use nf_model::{AttributeSet, Dependencies, FunctionalDependency, MultiValuedDependency};

use crate::error::{IngestError, Result};

/// Non-empty, non-comment lines of `path` with their 1-based line numbers.
pub fn read_dependency_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let content = fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;
    Ok(content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| (number, line.to_string()))
        .collect())
}

/// Parses an FD file and an optional MVD file.
///
/// The first malformed line aborts the whole read, so no partial dependency
/// set is ever returned.
pub fn read_dependencies(fd_path: &Path, mvd_path: Option<&Path>) -> Result<Dependencies> {
    let fds = parse_file::<FunctionalDependency>(fd_path)?;
    let mvds = match mvd_path {
        Some(path) => parse_file::<MultiValuedDependency>(path)?,
        None => Vec::new(),
    };
    debug!(fds = fds.len(), mvds = mvds.len(), "loaded dependencies");
    Ok(Dependencies::new(fds, mvds))
}

fn parse_file<T>(path: &Path) -> Result<Vec<T>>
where
    T: std::str::FromStr<Err = nf_model::NormalizeError>,
{
    read_dependency_lines(path)?
        .into_iter()
        .map(|(line, text)| {
            text.parse().map_err(|source| IngestError::Declaration {
                path: path.to_path_buf(),
                line,
                source,
            })
        })
        .collect()
}

/// Parses a comma-separated key such as `"A, B"`.
pub fn parse_key_hint(input: &str) -> Result<AttributeSet> {
    let mut key = AttributeSet::new();
    for name in input.split(',') {
        let name = name.trim();
        if name.is_empty() {
            return Err(IngestError::KeyHint {
                input: input.to_string(),
                reason: "empty attribute name".to_string(),
            });
        }
        if !key.insert(name) {
            return Err(IngestError::KeyHint {
                input: input.to_string(),
                reason: format!("attribute '{name}' listed twice"),
            });
        }
    }
    Ok(key)
}
