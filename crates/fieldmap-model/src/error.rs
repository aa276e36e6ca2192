//! Error types for mapping operations.

use thiserror::Error;

/// Errors from resolving mapping results.
///
/// Finding no suggestion for a field is never an error; an empty ranked list
/// means the field has to be mapped manually or left blank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingError {
    /// The chosen suggestion is not in the field's ranked list.
    #[error("Suggestion '{target}' is not a ranked choice for field '{field}'")]
    InvalidChoice {
        /// Raw name of the document field.
        field: String,
        /// Canonical key of the rejected choice.
        target: String,
    },

    /// Manual mapping to a key missing from the canonical catalog.
    #[error("Unknown canonical field: {0}")]
    UnknownTarget(String),
}

impl MappingError {
    /// Get the document field name associated with this error, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidChoice { field, .. } => Some(field),
            Self::UnknownTarget(_) => None,
        }
    }

    /// Get the canonical key associated with this error.
    pub fn target(&self) -> &str {
        match self {
            Self::InvalidChoice { target, .. } => target,
            Self::UnknownTarget(target) => target,
        }
    }
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
