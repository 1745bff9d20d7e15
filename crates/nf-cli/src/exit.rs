//! Process exit codes.

use nf_ingest::IngestError;
use nf_model::NormalizeError;

pub const SUCCESS: i32 = 0;
/// I/O, CSV, config and any other failure without a dedicated code.
pub const FAILURE: i32 = 1;
pub const DEPENDENCY_SYNTAX: i32 = 3;
pub const UNKNOWN_ATTRIBUTE: i32 = 4;
pub const UNSUPPORTED_FORM: i32 = 5;
pub const INCONSISTENT_KEY: i32 = 6;

/// Exit code for the first model error found in the error chain.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| {
            cause.downcast_ref::<NormalizeError>().or_else(|| {
                cause
                    .downcast_ref::<IngestError>()
                    .and_then(IngestError::model_error)
            })
        })
        .map_or(FAILURE, code_for)
}

fn code_for(error: &NormalizeError) -> i32 {
    match error {
        NormalizeError::InvalidDependencySyntax { .. }
        | NormalizeError::EmptyDeterminant { .. }
        | NormalizeError::EmptyDependent { .. } => DEPENDENCY_SYNTAX,
        NormalizeError::UnknownAttribute { .. } => UNKNOWN_ATTRIBUTE,
        NormalizeError::UnsupportedNormalForm { .. } => UNSUPPORTED_FORM,
        NormalizeError::InconsistentKeyHint { .. } => INCONSISTENT_KEY,
        NormalizeError::KeySearchTooLarge { .. }
        | NormalizeError::DependencySearchTooLarge { .. }
        | NormalizeError::FlattenTooLarge { .. }
        | NormalizeError::EmptyRelation { .. }
        | NormalizeError::DuplicateAttribute { .. }
        | NormalizeError::RowWidthMismatch { .. } => FAILURE,
    }
}
