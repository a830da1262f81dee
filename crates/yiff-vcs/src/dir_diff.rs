//! Directory diff between two references.
//!
//! Files are classified three ways: present at both references (content is
//! loaded and diffed), only at the base (removed), only at the target
//! (added). Only `.yaml` / `.yml` files take part.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};
use yiff_diff::DiffRecord;

use crate::error::{VcsError, VcsResult};
use crate::traits::{VcsFileLister, VcsFileReader};

/// What to do when a file present at both references fails to read or load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log a warning, record the file in [`DirDiff::skipped`], and continue.
    #[default]
    Skip,
    /// Abort the whole comparison with [`VcsError::File`].
    Strict,
}

/// Variable-level differences for one file present at both references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileDiff {
    pub file: String,
    pub variables: Vec<DiffRecord>,
}

/// A file that was left out under [`ErrorPolicy::Skip`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// The result of comparing a directory between two references.
///
/// Every list is sorted by path. Files with no variable-level differences
/// do not appear in `changed`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirDiff {
    pub changed: Vec<FileDiff>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

impl DirDiff {
    /// Returns `true` if no file changed, appeared or disappeared.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

/// Returns `true` for paths ending in `.yaml` or `.yml`.
pub fn is_yaml_path(path: &str) -> bool {
    path.ends_with(".yaml") || path.ends_with(".yml")
}

/// Compare every YAML file under `dir` between `from` (base) and `to` (target).
///
/// Listing failures always abort. Per-file failures follow `policy`.
pub fn diff_refs<L, R>(
    lister: &L,
    reader: &R,
    from: &str,
    to: &str,
    dir: &str,
    policy: ErrorPolicy,
) -> VcsResult<DirDiff>
where
    L: VcsFileLister + ?Sized,
    R: VcsFileReader + ?Sized,
{
    let base = yaml_files(lister, from, dir)?;
    let target = yaml_files(lister, to, dir)?;
    debug!(from, to, dir, base = base.len(), target = target.len(), "listed YAML files");

    let mut result = DirDiff::default();
    for path in base.union(&target) {
        match (base.contains(path), target.contains(path)) {
            (true, true) => match diff_file(reader, from, to, path) {
                Ok(variables) if variables.is_empty() => {}
                Ok(variables) => result.changed.push(FileDiff {
                    file: path.clone(),
                    variables,
                }),
                Err(err) if policy == ErrorPolicy::Strict => {
                    return Err(VcsError::File {
                        path: path.clone(),
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    warn!(file = %path, error = %err, "skipping file");
                    result.skipped.push(SkippedFile {
                        file: path.clone(),
                        reason: err.to_string(),
                    });
                }
            },
            (true, false) => result.removed.push(path.clone()),
            (false, true) => result.added.push(path.clone()),
            (false, false) => {}
        }
    }

    Ok(result)
}

fn yaml_files<L>(lister: &L, reference: &str, dir: &str) -> VcsResult<BTreeSet<String>>
where
    L: VcsFileLister + ?Sized,
{
    Ok(lister
        .list_files(reference, dir)?
        .into_iter()
        .filter(|path| is_yaml_path(path))
        .collect())
}

fn diff_file<R>(reader: &R, from: &str, to: &str, path: &str) -> VcsResult<Vec<DiffRecord>>
where
    R: VcsFileReader + ?Sized,
{
    let old = yiff_diff::load(&reader.read_file(from, path)?)?;
    let new = yiff_diff::load(&reader.read_file(to, path)?)?;
    Ok(yiff_diff::diff(&old, &new))
}
