//! 1NF repair: composite values become separate rows.

use nf_model::{NormalizeError, Relation, Result, Row};

/// Most rows a single source row may expand into.
pub const MAX_ROWS_PER_SOURCE_ROW: usize = 4096;

/// Splits every composite value on `separator` and emits one row per
/// combination of the parts.
///
/// Parts are trimmed and empty parts dropped; a value that is nothing but
/// separators becomes a single empty value. Atomic rows pass through
/// unchanged, and the key is carried over. A row whose combinations exceed
/// [`MAX_ROWS_PER_SOURCE_ROW`] is an error.
pub fn flatten(relation: &Relation, separator: char) -> Result<Relation> {
    let mut rows: Vec<Row> = Vec::with_capacity(relation.rows().len());
    for (index, row) in relation.rows().iter().enumerate() {
        let split: Vec<Vec<String>> = row
            .iter()
            .map(|value| split_value(value, separator))
            .collect();
        let combinations = split
            .iter()
            .try_fold(1usize, |total, parts| total.checked_mul(parts.len()))
            .filter(|&total| total <= MAX_ROWS_PER_SOURCE_ROW);
        if combinations.is_none() {
            return Err(NormalizeError::FlattenTooLarge {
                relation: relation.name().to_string(),
                row: index,
                limit: MAX_ROWS_PER_SOURCE_ROW,
            });
        }

        let mut expanded: Vec<Row> = vec![Vec::with_capacity(row.len())];
        for parts in &split {
            expanded = expanded
                .into_iter()
                .flat_map(|prefix| {
                    parts.iter().map(move |part| {
                        let mut next = prefix.clone();
                        next.push(part.clone());
                        next
                    })
                })
                .collect();
        }
        rows.extend(expanded);
    }

    let flattened = Relation::new(relation.name(), relation.attributes().iter())?.with_rows(rows)?;
    if relation.key().is_empty() {
        Ok(flattened)
    } else {
        flattened.with_key(relation.key().clone())
    }
}

fn split_value(value: &str, separator: char) -> Vec<String> {
    if !value.contains(separator) {
        return vec![value.to_string()];
    }
    let parts: Vec<String> = value
        .split(separator)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    if parts.is_empty() {
        vec![String::new()]
    } else {
        parts
    }
}
