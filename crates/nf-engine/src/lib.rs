//! Normalization engine.
//!
//! Builds on [`nf_model`]: attribute closure ([`closure`]), minimal covers
//! ([`cover`]), key analysis ([`keys`]), normal-form checks ([`check`]) and
//! decomposition towards 2NF, 3NF, BCNF and 4NF ([`decompose`]).
//! [`Normalizer`] ties them together behind one request-level API.
//!
//! All functions are pure over their inputs; decompositions return freshly
//! projected relations.

pub mod check;
pub mod closure;
pub mod cover;
pub mod decompose;
pub mod keys;
pub mod lossless;
pub mod naming;
pub mod normalizer;
pub mod options;

pub use check::{Checker, FormCheck, FormStatus, Violation};
pub use closure::{closure, implies, restricted_closure};
pub use cover::{minimal_cover, project_dependencies};
pub use decompose::{DecomposedRelation, Decomposition};
pub use keys::{KeyAnalysis, KeySource, is_candidate_key, is_superkey, prime_attributes};
pub use naming::{KeyDerivedNamer, TableNamer};
pub use normalizer::{Normalizer, Outcome};
pub use options::NormalizeOptions;
