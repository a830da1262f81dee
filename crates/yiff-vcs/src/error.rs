//! Error types for version-control operations.

use thiserror::Error;

/// Errors raised while listing, fetching or comparing files at a reference.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The external command could not be started.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The external command ran but exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// No file exists at this path for this reference.
    #[error("{path} not found at {reference}")]
    NotFound { reference: String, path: String },

    /// A single file could not be read or loaded (strict mode only).
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: Box<VcsError>,
    },

    /// A file's content is not a loadable YAML mapping.
    #[error("{0}")]
    Load(#[from] yiff_diff::LoadError),

    /// Lock poisoning in an in-memory backend.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for version-control operations.
pub type VcsResult<T> = std::result::Result<T, VcsError>;
