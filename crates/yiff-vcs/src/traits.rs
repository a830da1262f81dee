//! Capabilities the directory diff needs from a version-control system.

use crate::error::VcsResult;

/// Enumerates files present at a reference.
pub trait VcsFileLister: Send + Sync {
    /// List every file path under `dir` at `reference`, recursively.
    ///
    /// Paths are relative to the repository root. No extension filtering is
    /// applied here.
    fn list_files(&self, reference: &str, dir: &str) -> VcsResult<Vec<String>>;
}

/// Fetches file contents at a reference.
pub trait VcsFileReader: Send + Sync {
    /// Read the full contents of `path` as it exists at `reference`.
    fn read_file(&self, reference: &str, path: &str) -> VcsResult<Vec<u8>>;
}
