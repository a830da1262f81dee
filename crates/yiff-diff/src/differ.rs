//! Variable-level diff between two documents.
//!
//! Both documents are flattened, and the two ordered path maps are walked
//! side by side. Output is sorted by path (byte order), independent of the
//! source key order.

use std::cmp::Ordering;

use crate::flatten::{flatten, FlatPathMap};
use crate::node::Mapping;
use crate::record::DiffRecord;

/// Compare a baseline document `a` with a target document `b`.
pub fn diff(a: &Mapping, b: &Mapping) -> Vec<DiffRecord> {
    diff_flat(&flatten(a), &flatten(b))
}

/// Compare two already-flattened documents.
///
/// Paths only in `a` are removed, paths only in `b` are added, and paths in
/// both with unequal values are changed. Equal paths produce no record.
pub fn diff_flat(a: &FlatPathMap, b: &FlatPathMap) -> Vec<DiffRecord> {
    let mut records = Vec::new();
    let mut left = a.iter().peekable();
    let mut right = b.iter().peekable();

    loop {
        let ordering = match (left.peek(), right.peek()) {
            (None, None) => break,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((ka, _)), Some((kb, _))) => ka.cmp(kb),
        };

        match ordering {
            Ordering::Less => {
                if let Some((name, old)) = left.next() {
                    records.push(DiffRecord::removed(name, old));
                }
            }
            Ordering::Greater => {
                if let Some((name, new)) = right.next() {
                    records.push(DiffRecord::added(name, new));
                }
            }
            Ordering::Equal => {
                if let (Some((name, old)), Some((_, new))) = (left.next(), right.next()) {
                    if old != new {
                        records.push(DiffRecord::changed(name, old, new));
                    }
                }
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_str;
    use crate::node::Node;
    use crate::record::DiffStatus;

    fn diff_yaml(a: &str, b: &str) -> Vec<DiffRecord> {
        diff(&load_str(a).unwrap(), &load_str(b).unwrap())
    }

    #[test]
    fn changed_scalar() {
        let records = diff_yaml(
            "replicas: 2\nimage: {tag: \"v1\"}\n",
            "replicas: 3\nimage: {tag: \"v1\"}\n",
        );
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.name(), "replicas");
        assert_eq!(r.default(), Some(&Node::Int(2)));
        assert_eq!(r.value(), Some(&Node::Int(3)));
        assert_eq!(r.status(), DiffStatus::Changed);
    }

    #[test]
    fn added_key() {
        let records = diff_yaml("a: 1\n", "a: 1\nb: 2\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "b");
        assert_eq!(records[0].default(), None);
        assert_eq!(records[0].value(), Some(&Node::Int(2)));
        assert_eq!(records[0].status(), DiffStatus::Added);
    }

    #[test]
    fn removed_sequence_element() {
        let records = diff_yaml("list: [1, 2, 3]\n", "list: [1, 2]\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "list[2]");
        assert_eq!(records[0].default(), Some(&Node::Int(3)));
        assert_eq!(records[0].value(), None);
        assert_eq!(records[0].status(), DiffStatus::Removed);
    }

    #[test]
    fn empty_documents_have_no_diff() {
        assert!(diff_yaml("{}", "{}").is_empty());
    }

    #[test]
    fn integer_and_string_are_not_equal() {
        let records = diff_yaml("x: 1\n", "x: \"1\"\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status(), DiffStatus::Changed);
        assert_eq!(records[0].default(), Some(&Node::Int(1)));
        assert_eq!(records[0].value(), Some(&Node::from("1")));
    }

    #[test]
    fn null_versus_absent() {
        let records = diff_yaml("a: null\n", "{}");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status(), DiffStatus::Removed);
        assert_eq!(records[0].default(), Some(&Node::Null));
    }

    #[test]
    fn leaf_replaced_by_subtree() {
        let records = diff_yaml("svc: none\n", "svc: {port: 80}\n");
        let names: Vec<_> = records.iter().map(|r| (r.name(), r.status())).collect();
        assert_eq!(
            names,
            [("svc", DiffStatus::Removed), ("svc.port", DiffStatus::Added)]
        );
    }

    #[test]
    fn output_is_sorted_by_path() {
        let records = diff_yaml(
            "z: 1\nb: {y: 1}\nlist: [a]\n",
            "a: 1\nb: {x: 1}\nlist: [b, c]\n",
        );
        let names: Vec<_> = records.iter().map(DiffRecord::name).collect();
        assert_eq!(names, ["a", "b.x", "b.y", "list[0]", "list[1]", "z"]);
    }

    #[test]
    fn sort_is_byte_order_not_natural() {
        let a = load_str("l: [0,0,0,0,0,0,0,0,0,0,0]\n").unwrap();
        let b = load_str("l: [1,1,1,1,1,1,1,1,1,1,1]\n").unwrap();
        let names: Vec<_> = diff(&a, &b).iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names[1], "l[10]");
        assert_eq!(names[2], "l[1]");
    }

    #[test]
    fn mixed_changes() {
        let records = diff_yaml(
            "keep: true\nmodify: old\nremove: 42\n",
            "keep: true\nmodify: new\nadded: [1]\n",
        );
        let statuses: Vec<_> = records.iter().map(|r| (r.name(), r.status())).collect();
        assert_eq!(
            statuses,
            [
                ("added[0]", DiffStatus::Added),
                ("modify", DiffStatus::Changed),
                ("remove", DiffStatus::Removed),
            ]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn leaf() -> impl Strategy<Value = Node> {
            prop_oneof![
                Just(Node::Null),
                any::<bool>().prop_map(Node::Bool),
                (-1000i64..1000).prop_map(Node::Int),
                (-1.0e3f64..1.0e3).prop_map(Node::Float),
                "[a-z0-9]{0,4}".prop_map(Node::String),
            ]
        }

        fn node() -> impl Strategy<Value = Node> {
            leaf().prop_recursive(4, 32, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
                    prop::collection::btree_map("[a-e]{1,2}", inner, 0..4).prop_map(Node::Mapping),
                ]
            })
        }

        fn document() -> impl Strategy<Value = Mapping> {
            prop::collection::btree_map("[a-e]{1,2}", node(), 0..5)
        }

        proptest! {
            #[test]
            fn no_diff_against_self(a in document()) {
                prop_assert!(diff(&a, &a).is_empty());
            }

            #[test]
            fn flatten_is_deterministic(a in document()) {
                prop_assert_eq!(flatten(&a), flatten(&a));
            }

            #[test]
            fn repeated_diffs_are_identical(a in document(), b in document()) {
                prop_assert_eq!(diff(&a, &b), diff(&a, &b));
            }

            #[test]
            fn output_is_strictly_sorted(a in document(), b in document()) {
                let records = diff(&a, &b);
                for pair in records.windows(2) {
                    prop_assert!(pair[0].name() < pair[1].name());
                }
            }

            #[test]
            fn swapping_sides_mirrors_records(a in document(), b in document()) {
                let forward = diff(&a, &b);
                let backward = diff(&b, &a);
                prop_assert_eq!(forward.len(), backward.len());
                for (f, r) in forward.iter().zip(&backward) {
                    prop_assert_eq!(f.name(), r.name());
                    prop_assert_eq!(f.default(), r.value());
                    prop_assert_eq!(f.value(), r.default());
                    let mirrored = match f.status() {
                        DiffStatus::Changed => DiffStatus::Changed,
                        DiffStatus::Added => DiffStatus::Removed,
                        DiffStatus::Removed => DiffStatus::Added,
                    };
                    prop_assert_eq!(mirrored, r.status());
                }
            }
        }
    }
}
