//! Flattening: nested mapping to a single-level map of leaf paths.
//!
//! A key `k` under prefix `p` becomes `p.k` (bare `k` at the root); a
//! sequence element at index `i` becomes `p[i]`. Only leaves are recorded,
//! so empty mappings and empty sequences contribute no paths.

use std::collections::BTreeMap;

use crate::node::{Mapping, Node};

/// Leaf path to leaf value, ordered by path.
pub type FlatPathMap = BTreeMap<String, Node>;

/// Flatten a loaded document into its leaf paths.
pub fn flatten(document: &Mapping) -> FlatPathMap {
    let mut out = FlatPathMap::new();
    flatten_mapping("", document, &mut out);
    out
}

fn flatten_mapping(prefix: &str, map: &Mapping, out: &mut FlatPathMap) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        flatten_node(path, value, out);
    }
}

fn flatten_node(path: String, node: &Node, out: &mut FlatPathMap) {
    match node {
        Node::Mapping(map) => flatten_mapping(&path, map, out),
        Node::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_node(format!("{path}[{i}]"), item, out);
            }
        }
        leaf => {
            out.insert(path, leaf.clone());
        }
    }
}
