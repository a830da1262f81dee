//! In-memory version-control backend for tests and embedding.
//!
//! [`InMemoryVcs`] keeps file contents per `(reference, path)` in a
//! `BTreeMap` behind a `RwLock` and implements both [`VcsFileLister`] and
//! [`VcsFileReader`].

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{VcsError, VcsResult};
use crate::traits::{VcsFileLister, VcsFileReader};

/// An in-memory set of files at named references.
#[derive(Debug, Default)]
pub struct InMemoryVcs {
    files: RwLock<BTreeMap<(String, String), Vec<u8>>>,
}

impl InMemoryVcs {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `contents` at `path` for `reference`, replacing any previous file.
    pub fn insert(
        &self,
        reference: &str,
        path: &str,
        contents: impl Into<Vec<u8>>,
    ) -> VcsResult<()> {
        let mut files = self
            .files
            .write()
            .map_err(|e| VcsError::Internal(format!("lock poisoned: {e}")))?;
        files.insert((reference.to_string(), path.to_string()), contents.into());
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) for test fixtures.
    pub fn with_file(mut self, reference: &str, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        if let Ok(files) = self.files.get_mut() {
            files.insert((reference.to_string(), path.to_string()), contents.into());
        }
        self
    }
}

fn is_under(path: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        return true;
    }
    path == dir
        || path
            .strip_prefix(dir)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl VcsFileLister for InMemoryVcs {
    fn list_files(&self, reference: &str, dir: &str) -> VcsResult<Vec<String>> {
        let files = self
            .files
            .read()
            .map_err(|e| VcsError::Internal(format!("lock poisoned: {e}")))?;
        Ok(files
            .keys()
            .filter(|(r, path)| r == reference && is_under(path, dir))
            .map(|(_, path)| path.clone())
            .collect())
    }
}

impl VcsFileReader for InMemoryVcs {
    fn read_file(&self, reference: &str, path: &str) -> VcsResult<Vec<u8>> {
        let files = self
            .files
            .read()
            .map_err(|e| VcsError::Internal(format!("lock poisoned: {e}")))?;
        files
            .get(&(reference.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| VcsError::NotFound {
                reference: reference.to_string(),
                path: path.to_string(),
            })
    }
}
