//! Error types for fnctx-fs

use std::path::PathBuf;

/// Result type for fnctx-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fnctx-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to serialize YAML for {path}: {message}")]
    ConfigSerialize { path: PathBuf, message: String },

    #[error("Expected a YAML mapping at {path}")]
    NotAMapping { path: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("Invalid identifier {value:?}: {reason}")]
    InvalidIdentifier { value: String, reason: &'static str },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the file was simply not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
