//! Document loading: YAML bytes to a string-keyed [`Mapping`].
//!
//! Parsing is delegated to `serde_yaml`; merge keys (`<<: *anchor`) are
//! applied and the resulting value tree is then normalized so that every
//! mapping key, at any depth, is a string.

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{LoadError, LoadResult};
use crate::node::{Mapping, Node};

/// Load one YAML document whose top-level node is a mapping.
///
/// A document with no content (empty, or only comments, directives and
/// markers) loads as an empty mapping. Any other non-mapping top level is a
/// [`LoadError::Shape`]. Empty documents after the first are ignored; a later
/// document with content is [`LoadError::MultipleDocuments`].
pub fn load(bytes: &[u8]) -> LoadResult<Mapping> {
    if is_blank_document(bytes) {
        return Ok(Mapping::new());
    }

    let mut documents = serde_yaml::Deserializer::from_slice(bytes);
    let Some(first) = documents.next() else {
        return Ok(Mapping::new());
    };
    let mut raw = Value::deserialize(first)?;
    for (index, document) in documents.enumerate() {
        if !Value::deserialize(document)?.is_null() {
            return Err(LoadError::MultipleDocuments { index: index + 2 });
        }
    }

    raw.apply_merge()?;
    match normalize(raw) {
        Node::Mapping(map) => Ok(map),
        other => Err(LoadError::Shape {
            found: other.type_name(),
        }),
    }
}

/// Load from a string slice.
pub fn load_str(text: &str) -> LoadResult<Mapping> {
    load(text.as_bytes())
}

fn is_blank_document(bytes: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return false;
    };
    text.trim_start_matches('\u{feff}').lines().all(|line| {
        let line = line.trim();
        if line.starts_with('%') {
            return true;
        }
        let content = strip_comment(line);
        content.is_empty() || content == "---" || content == "..."
    })
}

/// A `#` opens a comment at the start of a line or after whitespace.
fn strip_comment(line: &str) -> &str {
    if line.starts_with('#') {
        return "";
    }
    match line.find(" #").or_else(|| line.find("\t#")) {
        Some(i) => line[..i].trim_end(),
        None => line,
    }
}

fn normalize(value: Value) -> Node {
    match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Node::Int(i),
            // Integers past i64 and all non-integers.
            None => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Node::String(s),
        Value::Sequence(items) => Node::Sequence(items.into_iter().map(normalize).collect()),
        Value::Mapping(map) => Node::Mapping(
            map.into_iter()
                .map(|(key, value)| (key_string(key), normalize(value)))
                .collect(),
        ),
        Value::Tagged(tagged) => normalize(tagged.value),
    }
}

fn key_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => normalize(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_nested_mapping() {
        let doc = load_str("image:\n  repository: nginx\n  tag: \"1.25\"\nreplicas: 2\n").unwrap();
        assert_eq!(doc["replicas"], Node::Int(2));
        let image = doc["image"].as_mapping().unwrap();
        assert_eq!(image["tag"], Node::from("1.25"));
    }

    #[test]
    fn empty_mapping_is_valid() {
        assert!(load_str("{}").unwrap().is_empty());
    }

    #[test]
    fn blank_document_is_empty_mapping() {
        assert!(load(b"").unwrap().is_empty());
        assert!(load_str("# only a comment\n\n---\n").unwrap().is_empty());
    }

    #[test]
    fn marker_with_comment_is_blank() {
        assert!(load_str("--- # values\n").unwrap().is_empty());
        assert!(load_str("# header\n--- #values\n...\n").unwrap().is_empty());
    }

    #[test]
    fn directive_only_document_is_blank() {
        assert!(load_str("%YAML 1.2\n---\n").unwrap().is_empty());
    }

    #[test]
    fn byte_order_mark_alone_is_blank() {
        assert!(load_str("\u{feff}").unwrap().is_empty());
        assert!(load_str("\u{feff}# comment\n").unwrap().is_empty());
    }

    #[test]
    fn marker_with_comment_before_content() {
        let doc = load_str("--- # values\nreplicas: 2\n").unwrap();
        assert_eq!(doc["replicas"], Node::Int(2));
    }

    #[test]
    fn scalar_document_is_shape_error() {
        let err = load_str("5").unwrap_err();
        assert!(matches!(err, LoadError::Shape { found: "int" }));
        assert!(!err.is_parse());
    }

    #[test]
    fn sequence_document_is_shape_error() {
        let err = load_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, LoadError::Shape { found: "sequence" }));
    }

    #[test]
    fn explicit_null_document_is_shape_error() {
        let err = load_str("~").unwrap_err();
        assert!(matches!(err, LoadError::Shape { found: "null" }));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = load_str("a: [1, 2\nb: }").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn trailing_empty_document_is_ignored() {
        let doc = load_str("a: 1\n---\n").unwrap();
        assert_eq!(doc["a"], Node::Int(1));
        let doc = load_str("a: 1\n---\n# nothing here\n...\n").unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn multi_document_stream_is_parse_error() {
        let err = load_str("a: 1\n---\nb: 2\n").unwrap_err();
        assert!(matches!(err, LoadError::MultipleDocuments { index: 2 }));
        assert!(err.is_parse());
    }

    #[test]
    fn merge_keys_are_applied() {
        let doc = load_str("base: &b {x: 1}\nsvc:\n  <<: *b\n  y: 2\n").unwrap();
        let svc = doc["svc"].as_mapping().unwrap();
        assert_eq!(svc["x"], Node::Int(1));
        assert_eq!(svc["y"], Node::Int(2));
        assert!(!svc.contains_key("<<"));
    }

    #[test]
    fn explicit_keys_override_merged_ones() {
        let doc = load_str("base: &b {x: 1, y: 1}\nsvc:\n  <<: *b\n  y: 2\n").unwrap();
        let svc = doc["svc"].as_mapping().unwrap();
        assert_eq!(svc["x"], Node::Int(1));
        assert_eq!(svc["y"], Node::Int(2));
    }

    #[test]
    fn colliding_keys_keep_the_later_one() {
        let doc = load_str("1: x\n\"1\": y\n").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc["1"], Node::from("y"));
    }

    #[test]
    fn non_string_keys_are_stringified() {
        let doc = load_str("1: one\ntrue: yes\n2.5: half\nnested:\n  - 10: ten\n").unwrap();
        assert_eq!(doc["1"], Node::from("one"));
        assert_eq!(doc["true"], Node::from("yes"));
        assert_eq!(doc["2.5"], Node::from("half"));

        let Node::Sequence(items) = &doc["nested"] else {
            panic!("expected sequence");
        };
        assert_eq!(items[0].as_mapping().unwrap()["10"], Node::from("ten"));
    }

    #[test]
    fn scalar_types_are_preserved() {
        let doc = load_str("i: 1\ns: \"1\"\nf: 1.0\nb: false\nn: null\n").unwrap();
        assert_eq!(doc["i"], Node::Int(1));
        assert_eq!(doc["s"], Node::from("1"));
        assert_eq!(doc["f"], Node::Float(1.0));
        assert_eq!(doc["b"], Node::Bool(false));
        assert_eq!(doc["n"], Node::Null);
    }

    #[test]
    fn anchors_and_aliases_resolve() {
        let doc = load_str("base: &b {x: 1}\ncopy: *b\n").unwrap();
        assert_eq!(doc["base"], doc["copy"]);
    }

    #[test]
    fn tagged_values_keep_inner_value() {
        let doc = load_str("v: !custom hello\n").unwrap();
        assert_eq!(doc["v"], Node::from("hello"));
    }

    #[test]
    fn huge_integers_become_floats() {
        let doc = load_str("big: 18446744073709551615\n").unwrap();
        assert_eq!(doc["big"].type_name(), "float");
    }
}
