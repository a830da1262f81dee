//! Version-control adapter for yiff.
//!
//! Compares every `.yaml` / `.yml` file under a directory between two
//! version-control references, delegating per-file comparison to
//! [`yiff_diff`].
//!
//! # Modules
//!
//! - [`error`] -- Error types for listing, reading and per-file failures
//! - [`traits`] -- [`VcsFileLister`] / [`VcsFileReader`] capabilities
//! - [`git`] -- [`GitCli`], backed by the `git` executable
//! - [`memory`] -- In-memory [`InMemoryVcs`] for tests
//! - [`dir_diff`] -- Three-way file classification and per-file diffs

pub mod dir_diff;
pub mod error;
pub mod git;
pub mod memory;
pub mod traits;

pub use dir_diff::{diff_refs, is_yaml_path, DirDiff, ErrorPolicy, FileDiff, SkippedFile};
pub use error::{VcsError, VcsResult};
pub use git::GitCli;
pub use memory::InMemoryVcs;
pub use traits::{VcsFileLister, VcsFileReader};
