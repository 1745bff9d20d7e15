//! Error taxonomy shared by the model and the normalization engine.

use thiserror::Error;

/// Errors raised while building or normalizing a relation.
///
/// Every variant is a deterministic input-validation failure; none of them
/// is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    // === Dependency declarations ===
    /// A dependency declaration could not be parsed.
    #[error("invalid dependency '{input}': {reason}")]
    InvalidDependencySyntax { input: String, reason: String },

    /// A dependency references an attribute the relation does not have.
    #[error("attribute '{attribute}' in '{dependency}' is not part of relation '{relation}'")]
    UnknownAttribute {
        attribute: String,
        dependency: String,
        relation: String,
    },

    /// A dependency was constructed with an empty determinant.
    #[error("dependency has an empty determinant (dependent: {dependent})")]
    EmptyDeterminant { dependent: String },

    /// A dependency was constructed with an empty dependent.
    #[error("dependency has an empty dependent (determinant: {determinant})")]
    EmptyDependent { determinant: String },

    // === Normal forms and keys ===
    /// The normal-form tag is unknown, or the form cannot be reached automatically.
    #[error("unsupported normal form '{form}': {reason}")]
    UnsupportedNormalForm { form: String, reason: String },

    /// A caller-supplied key does not determine every attribute.
    #[error("key hint ({key}) is not a superkey of '{relation}'; its closure is ({closure})")]
    InconsistentKeyHint {
        key: String,
        closure: String,
        relation: String,
    },

    /// Automatic key discovery would have to search too many attributes.
    #[error(
        "candidate key search over {attributes} attributes exceeds the limit of {limit}; supply key hints instead"
    )]
    KeySearchTooLarge { attributes: usize, limit: usize },

    /// Finding the dependencies that hold on a projection would have to
    /// search too many attributes.
    #[error(
        "dependency search over {searched} attributes of ({attributes}) exceeds the limit of {limit}"
    )]
    DependencySearchTooLarge {
        attributes: String,
        searched: usize,
        limit: usize,
    },

    /// Splitting composite values would produce too many rows.
    #[error(
        "splitting composite values of row {row} in '{relation}' gives more than {limit} rows"
    )]
    FlattenTooLarge {
        relation: String,
        row: usize,
        limit: usize,
    },

    // === Relation construction ===
    /// A relation must have at least one attribute.
    #[error("relation '{name}' has no attributes")]
    EmptyRelation { name: String },

    /// Attribute names must be unique within a relation.
    #[error("attribute '{attribute}' appears more than once in relation '{relation}'")]
    DuplicateAttribute { attribute: String, relation: String },

    /// A row does not have one value per attribute.
    #[error("row {row} of '{relation}' has {found} values, expected {expected}")]
    RowWidthMismatch {
        relation: String,
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl NormalizeError {
    /// Stable identifier for the error condition.
    pub fn code(&self) -> &'static str {
        match self {
            NormalizeError::InvalidDependencySyntax { .. } => "INVALID_DEPENDENCY_SYNTAX",
            NormalizeError::UnknownAttribute { .. } => "UNKNOWN_ATTRIBUTE",
            NormalizeError::EmptyDeterminant { .. } => "EMPTY_DETERMINANT",
            NormalizeError::EmptyDependent { .. } => "EMPTY_DEPENDENT",
            NormalizeError::UnsupportedNormalForm { .. } => "UNSUPPORTED_NORMAL_FORM",
            NormalizeError::InconsistentKeyHint { .. } => "INCONSISTENT_KEY_HINT",
            NormalizeError::KeySearchTooLarge { .. } => "KEY_SEARCH_TOO_LARGE",
            NormalizeError::DependencySearchTooLarge { .. } => "DEPENDENCY_SEARCH_TOO_LARGE",
            NormalizeError::FlattenTooLarge { .. } => "FLATTEN_TOO_LARGE",
            NormalizeError::EmptyRelation { .. } => "EMPTY_RELATION",
            NormalizeError::DuplicateAttribute { .. } => "DUPLICATE_ATTRIBUTE",
            NormalizeError::RowWidthMismatch { .. } => "ROW_WIDTH_MISMATCH",
        }
    }

    pub(crate) fn syntax(input: &str, reason: impl Into<String>) -> Self {
        NormalizeError::InvalidDependencySyntax {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for model and engine operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
