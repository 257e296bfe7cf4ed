use thiserror::Error;

/// Result type for schema construction (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error)]
pub enum Error {
    /// An enumeration leaf declares no values; the input schema is malformed.
    #[error("enumeration at '{path}' declares no values")]
    EmptyEnumeration { path: String },

    /// The enumeration resolver was called on a leaf of another type.
    #[error("'{path}' is a {kind}, not an enumeration")]
    NotAnEnumeration { path: String, kind: String },

    /// A config path has a prefix that is missing from the full path index.
    #[error("no entry recorded for path '{path}'")]
    MissingEntry { path: String },

    /// Two paths disagree about the shape of the same property. Carries the
    /// first conflict found.
    #[error("{message} (at '{path}')")]
    ShapeConflict { path: String, message: String },

    /// A phase ran before the phase that produces its input.
    #[error("{phase} phase requires {missing}")]
    PhaseOrder {
        phase: &'static str,
        missing: &'static str,
    },

    #[error("failed to serialize schema document")]
    Serialize(#[from] serde_json::Error),
}
