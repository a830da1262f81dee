//! Flatten-and-diff engine for YAML values files.
//!
//! Loads two YAML documents into normalized [`Node`] trees, flattens each
//! into a map of dotted/indexed leaf paths, and compares the two maps to
//! produce an ordered list of [`DiffRecord`]s, one per variable that was
//! added, removed, or changed.
//!
//! # Key Types
//!
//! - [`Node`] / [`Mapping`] -- Normalized document tree with string keys
//! - [`FlatPathMap`] -- Leaf path (`image.tag`, `hosts[0]`) to value
//! - [`DiffRecord`] / [`DiffStatus`] -- One reported difference
//! - [`LoadError`] -- Parse and shape failures from [`load`]
//!
//! ```
//! let a = yiff_diff::load_str("replicas: 2\nimage: {tag: v1}\n").unwrap();
//! let b = yiff_diff::load_str("replicas: 3\nimage: {tag: v1}\n").unwrap();
//! let records = yiff_diff::diff(&a, &b);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].name(), "replicas");
//! ```

pub mod differ;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod node;
pub mod record;

pub use differ::{diff, diff_flat};
pub use error::{LoadError, LoadResult};
pub use flatten::{flatten, FlatPathMap};
pub use loader::{load, load_str};
pub use node::{Mapping, Node};
pub use record::{DiffRecord, DiffStatus, DiffSummary, Variables};
