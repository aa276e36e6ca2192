#![deny(unsafe_code)]

use std::path::PathBuf;

/// Errors raised while loading or validating the matching standards.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML table {name}: {source}")]
    Toml {
        name: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid canonical field '{key}': {message}")]
    InvalidField { key: String, message: String },

    #[error("duplicate canonical field key: {key}")]
    DuplicateField { key: String },

    #[error("{table} references unknown canonical field: {target}")]
    UnknownTarget { table: String, target: String },

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("confidence {confidence} for '{target}' in {table} is outside [0, 1]")]
    InvalidConfidence {
        table: String,
        target: String,
        confidence: f32,
    },

    #[error("invalid context table: {message}")]
    InvalidContextTable { message: String },

    #[error("embedded standards failed to load: {message}")]
    Embedded { message: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn toml(name: impl Into<String>, source: toml::de::Error) -> Self {
        Self::Toml {
            name: name.into(),
            source,
        }
    }
}

/// Result type for standards loading operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
