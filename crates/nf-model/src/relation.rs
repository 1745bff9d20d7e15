//! Relations: a named attribute set with optional row data.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::attribute::AttributeSet;
use crate::error::{NormalizeError, Result};

/// One tuple; values are aligned with the relation's attribute order.
pub type Row = Vec<String>;

/// A named relation.
///
/// Invariants: the attribute set is non-empty, every row has exactly one
/// value per attribute, and the key (when set) is a subset of the attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    name: String,
    attributes: AttributeSet,
    #[serde(skip_serializing_if = "AttributeSet::is_empty")]
    key: AttributeSet,
    rows: Vec<Row>,
}

impl Relation {
    pub fn new<I, S>(name: impl Into<String>, attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut set = AttributeSet::new();
        for attribute in attributes {
            let attribute = attribute.into();
            if set.contains(&attribute) {
                return Err(NormalizeError::DuplicateAttribute {
                    attribute,
                    relation: name,
                });
            }
            set.insert(attribute);
        }
        if set.is_empty() {
            return Err(NormalizeError::EmptyRelation { name });
        }
        Ok(Self {
            name,
            attributes: set,
            key: AttributeSet::new(),
            rows: Vec::new(),
        })
    }

    /// Attaches row data, checking that each row has one value per attribute.
    pub fn with_rows(mut self, rows: Vec<Row>) -> Result<Self> {
        let expected = self.attributes.len();
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(NormalizeError::RowWidthMismatch {
                relation: self.name,
                row: index,
                expected,
                found: row.len(),
            });
        }
        self.rows = rows;
        Ok(self)
    }

    /// Declares the relation's primary key.
    pub fn with_key(mut self, key: AttributeSet) -> Result<Self> {
        if let Some(missing) = key.iter().find(|attribute| !self.attributes.contains(attribute)) {
            return Err(NormalizeError::UnknownAttribute {
                attribute: missing.to_string(),
                dependency: format!("key ({key})"),
                relation: self.name,
            });
        }
        self.key = key;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn key(&self) -> &AttributeSet {
        &self.key
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn index_of(&self, attribute: &str) -> Option<usize> {
        self.attributes.iter().position(|name| name == attribute)
    }

    /// Values of one column, in row order.
    pub fn column(&self, attribute: &str) -> Option<Vec<&str>> {
        let index = self.index_of(attribute)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Projects onto `attributes`, producing a fresh relation.
    ///
    /// Columns keep this relation's declaration order. With `deduplicate`
    /// set, repeated projected rows are dropped (first occurrence wins);
    /// otherwise every source row yields one output row.
    pub fn project(
        &self,
        name: impl Into<String>,
        attributes: &AttributeSet,
        deduplicate: bool,
    ) -> Result<Relation> {
        let name = name.into();
        if let Some(missing) = attributes
            .iter()
            .find(|attribute| !self.attributes.contains(attribute))
        {
            return Err(NormalizeError::UnknownAttribute {
                attribute: missing.to_string(),
                dependency: format!("projection ({attributes})"),
                relation: self.name.clone(),
            });
        }
        let ordered = attributes.ordered_by(&self.attributes);
        let indices: Vec<usize> = ordered
            .iter()
            .filter_map(|attribute| self.index_of(attribute))
            .collect();

        let mut seen = BTreeSet::new();
        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let projected: Row = indices.iter().map(|&index| row[index].clone()).collect();
            if deduplicate && !seen.insert(projected.clone()) {
                continue;
            }
            rows.push(projected);
        }

        Relation::new(name, ordered.to_vec())?.with_rows(rows)
    }
}
