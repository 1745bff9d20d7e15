//! Data model for relational-schema normalization.
//!
//! A [`Relation`] is a named, non-empty [`AttributeSet`] with optional rows.
//! [`FunctionalDependency`] and [`MultiValuedDependency`] values are always
//! well formed: both sides are non-empty, and the text parsers reject
//! malformed declarations before any algorithm sees them.

pub mod attribute;
pub mod dependency;
pub mod error;
pub mod form;
pub mod relation;

pub use attribute::AttributeSet;
pub use dependency::{Dependencies, FunctionalDependency, MultiValuedDependency};
pub use error::{NormalizeError, Result};
pub use form::NormalForm;
pub use relation::{Relation, Row};
