//! Error types for fnctx-core

use std::path::PathBuf;

use crate::layout::StorePath;

/// Result type for fnctx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fnctx-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No home directory could be determined for the current user
    #[error("Could not determine home directory")]
    HomeNotFound,

    /// A directory or file of the store hierarchy could not be created
    #[error("error creating {}: {source}", .artifact.describe())]
    Bootstrap {
        artifact: StorePath,
        #[source]
        source: fnctx_fs::Error,
    },

    /// The root config file is missing or malformed
    #[error("Root config unreadable at {path}: {source}")]
    RootConfigUnreadable {
        path: PathBuf,
        #[source]
        source: fnctx_fs::Error,
    },

    /// A named context file is missing, malformed, or has an invalid name
    #[error("Context '{name}' unreadable: {source}")]
    ContextUnreadable {
        name: String,
        #[source]
        source: fnctx_fs::Error,
    },

    /// The current-context pointer could not be updated
    #[error("Failed to update current context in {path}: {source}")]
    CurrentContextWrite {
        path: PathBuf,
        #[source]
        source: fnctx_fs::Error,
    },

    /// The requested context has no context file
    #[error("Context '{name}' does not exist")]
    ContextNotFound { name: String },

    /// Filesystem error from fnctx-fs
    #[error(transparent)]
    Fs(#[from] fnctx_fs::Error),
}
