//! Error types for tomlenv-core

use std::path::PathBuf;

use crate::validate::ValidationError;

/// Result type for tomlenv-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tomlenv-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested environment has no mapping to a source directory
    #[error("Unknown environment: {name} (expected one of: local, dev, staging, prod)")]
    UnknownEnvironment { name: String },

    /// The mandatory base document is missing
    #[error("Base configuration not found at {path}")]
    SourceNotFound { path: PathBuf },

    /// Syntax error in a TOML document
    #[error("Malformed TOML in {path}: {message}")]
    MalformedSource { path: PathBuf, message: String },

    /// One or more schema violations, always carrying the full list
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A nested value reached the flat renderer
    #[error("Field {field} holds a nested value that cannot be rendered as a flat env line")]
    UnflattenableValue { field: String },

    /// I/O error with the path it occurred at
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Advisory lock on the output file could not be acquired
    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    /// TOML deserialization error (typed settings conversion)
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
