//! Boundary adapters that turn files into model values.
//!
//! - **Relations**: a CSV file with a header row becomes a [`Relation`]
//!   named after the file stem.
//! - **Dependencies**: text files with one declaration per line
//!   (`A, B -> C` or `A ->> B`); blank lines and `#` comments are skipped.
//! - **Key hints**: comma-separated attribute lists such as `"A, B"`.
//!
//! [`Relation`]: nf_model::Relation

mod declarations;
mod error;
mod relation;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use relation::read_relation;

// === Declarations ===
pub use declarations::{parse_key_hint, read_dependencies, read_dependency_lines};
