//! Diff records: one per variable whose value differs between two documents.

use std::fmt;

use serde::Serialize;

use crate::node::Node;

/// How a variable differs between the baseline and the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    /// Present on both sides with unequal values.
    Changed,
    /// Present only in the target.
    Added,
    /// Present only in the baseline.
    Removed,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStatus::Changed => "changed",
            DiffStatus::Added => "added",
            DiffStatus::Removed => "removed",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single variable-level difference.
///
/// `default` is the baseline value and `value` the target value; either is
/// `None` (serialized as `null`) when the path is absent on that side.
/// Records are only produced by [`crate::diff`] and are read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    name: String,
    default: Option<Node>,
    value: Option<Node>,
    status: DiffStatus,
}

impl DiffRecord {
    pub(crate) fn changed(name: &str, default: &Node, value: &Node) -> Self {
        Self {
            name: name.to_string(),
            default: Some(default.clone()),
            value: Some(value.clone()),
            status: DiffStatus::Changed,
        }
    }

    pub(crate) fn added(name: &str, value: &Node) -> Self {
        Self {
            name: name.to_string(),
            default: None,
            value: Some(value.clone()),
            status: DiffStatus::Added,
        }
    }

    pub(crate) fn removed(name: &str, default: &Node) -> Self {
        Self {
            name: name.to_string(),
            default: Some(default.clone()),
            value: None,
            status: DiffStatus::Removed,
        }
    }

    /// The flat path of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The baseline value, if the path exists there.
    pub fn default(&self) -> Option<&Node> {
        self.default.as_ref()
    }

    /// The target value, if the path exists there.
    pub fn value(&self) -> Option<&Node> {
        self.value.as_ref()
    }

    pub fn status(&self) -> DiffStatus {
        self.status
    }
}

/// Per-status counts over a list of records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub changed: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffSummary {
    pub fn from_records(records: &[DiffRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            match record.status {
                DiffStatus::Changed => summary.changed += 1,
                DiffStatus::Added => summary.added += 1,
                DiffStatus::Removed => summary.removed += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.changed + self.added + self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed, {} added, {} removed",
            self.changed, self.added, self.removed
        )
    }
}

/// The `{"variables": [...]}` envelope used by serialized output.
#[derive(Debug, Serialize)]
pub struct Variables<'a> {
    pub variables: &'a [DiffRecord],
}

impl<'a> Variables<'a> {
    pub fn new(variables: &'a [DiffRecord]) -> Self {
        Self { variables }
    }
}
