use thiserror::Error;

/// Errors raised while assembling a scoped control-flow tree from a scanner stream.
///
/// Every variant carries the offending element id so callers can point at the
/// exact source construct without the core knowing anything about presentation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedScopeError {
    #[error("element '{element_id}' appears more than once in the stream")]
    DuplicateElementId { element_id: String },

    #[error("branch point '{element_id}' declares no outcome labels")]
    MissingOutcomes { element_id: String },

    #[error("element '{element_id}' is owned by '{owner_id}', which does not exist in the stream")]
    UnknownOwner {
        element_id: String,
        owner_id: String,
    },

    #[error("element '{element_id}' is owned by '{owner_id}', which is not a branch point")]
    NonBranchOwner {
        element_id: String,
        owner_id: String,
    },

    #[error(
        "element '{element_id}' claims outcome '{outcome}' of branch '{owner_id}', which only declares '{positive}' and '{negative}'"
    )]
    UndeclaredOutcome {
        element_id: String,
        owner_id: String,
        outcome: String,
        positive: String,
        negative: String,
    },

    #[error("the ownership chain of element '{element_id}' loops back on itself")]
    OwnershipCycle { element_id: String },
}

/// Raised by the pre-flight explosion guard, always before any expansion work.
///
/// The branch point limit is checked first, then the total path limit. Both
/// variants carry the exact numeric inputs so the caller can retry with
/// relaxed limits or a narrower source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathExplosionError {
    #[error(
        "{branch_point_count} branch points would produce {computed_path_count} paths, exceeding the branch point limit of {limit}"
    )]
    TooManyBranchPoints {
        branch_point_count: usize,
        computed_path_count: u64,
        limit: usize,
    },

    #[error(
        "{branch_point_count} branch points would produce {computed_path_count} paths, exceeding the path limit of {limit}"
    )]
    TooManyPaths {
        branch_point_count: usize,
        computed_path_count: u64,
        limit: u64,
    },
}

/// Errors raised when decoding the scanner JSON interchange format.
///
/// A decode failure is distinct from a valid stream with no elements, so a
/// scanner parse failure can never be mistaken for "no branching present".
#[derive(Error, Debug)]
pub enum StreamDecodeError {
    #[error("failed to parse workflow stream JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when converting a custom scanner format into a
/// Keiro `WorkflowStream`.
#[derive(Error, Debug, Clone)]
pub enum StreamConversionError {
    #[error("invalid scanner output: {0}")]
    ValidationError(String),
}
