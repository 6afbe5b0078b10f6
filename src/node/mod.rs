//! Element accessor and coercion layer.
//!
//! Primitive operations over the generic element tree produced by the
//! document parser. Nothing in here knows about feeds: a node is a
//! [`serde_json::Value`] whose mappings hold child tags, `@`-prefixed
//! attributes and `#text` content.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One parsed element (or the document root).
pub type Node = Value;

/// The mapping half of a [`Node`].
pub type NodeMap = Map<String, Value>;

/// Key holding the textual content of an element.
pub const TEXT_KEY: &str = "#text";

/// Prefix marking attribute keys.
pub const ATTRIBUTE_PREFIX: &str = "@";

/// Strictness applied when reading scalars out of the tree.
///
/// A single mode is threaded through every call of one document pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Only values that already have the target type are accepted.
    Strict,
    /// Numbers and booleans become strings, numeric strings become numbers.
    #[default]
    Coerce,
}

/// Returns true iff `value` is a mapping.
pub fn is_node(value: &Value) -> bool {
    value.is_object()
}

/// Borrow the mapping behind `value`, if it is one.
pub fn as_node(value: &Value) -> Option<&NodeMap> {
    value.as_object()
}

/// Singular lookup of a child tag. Repeated tags yield their first occurrence.
pub fn child<'a>(node: &'a NodeMap, key: &str) -> Option<&'a Value> {
    match node.get(key)? {
        Value::Array(values) => values.first(),
        value => Some(value),
    }
}

/// Textual content of the child tag `key`.
///
/// Elements keep their text under [`TEXT_KEY`]; a bare scalar in place of an
/// element is taken as the text itself.
pub fn text<'a>(node: &'a NodeMap, key: &str) -> Option<&'a Value> {
    match child(node, key)? {
        Value::Object(element) => element.get(TEXT_KEY),
        Value::Array(_) => None,
        scalar => Some(scalar),
    }
}

/// Textual content of the node itself.
pub fn own_text(node: &NodeMap) -> Option<&Value> {
    node.get(TEXT_KEY)
}

/// Attribute `name` of the node, looked up without its prefix.
pub fn attribute<'a>(node: &'a NodeMap, name: &str) -> Option<&'a Value> {
    node.get(&format!("{ATTRIBUTE_PREFIX}{name}"))
}

pub fn as_string(value: Option<&Value>, mode: Mode) -> Option<String> {
    match (value?, mode) {
        (Value::String(s), _) => Some(s.clone()),
        (Value::Number(n), Mode::Coerce) => Some(n.to_string()),
        (Value::Bool(b), Mode::Coerce) => Some(b.to_string()),
        _ => None,
    }
}

pub fn as_number(value: Option<&Value>, mode: Mode) -> Option<Number> {
    match (value?, mode) {
        (Value::Number(n), _) => Some(n.clone()),
        (Value::String(s), Mode::Coerce) => parse_number(s),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n.into());
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n.into());
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Normalize a possibly-repeated tag into an ordered sequence.
///
/// Absent yields an empty sequence, a single value a one-element sequence.
/// Elements the extractor rejects are dropped without affecting siblings.
pub fn as_sequence_of<'a, T, F>(value: Option<&'a Value>, mut extract: F) -> Vec<T>
where
    F: FnMut(&'a Value) -> Option<T>,
{
    match value {
        None => Vec::new(),
        Some(Value::Array(values)) => values.iter().filter_map(|v| extract(v)).collect(),
        Some(value) => extract(value).into_iter().collect(),
    }
}

/// Whether a field of an extracted entity carries a value.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Field descriptor of an extracted entity, consumed by the presence gates.
pub trait Fields {
    /// Every field the entity defines, by canonical name.
    const FIELDS: &'static [&'static str];

    fn has(&self, field: &str) -> bool;
}

/// Implements [`Fields`] from a `field => "name"` list.
macro_rules! impl_fields {
    ($ty:ty { $($field:ident => $name:literal),* $(,)? }) => {
        impl $crate::node::Fields for $ty {
            const FIELDS: &'static [&'static str] = &[$($name),*];

            fn has(&self, field: &str) -> bool {
                match field {
                    $($name => $crate::node::Presence::is_present(&self.$field),)*
                    _ => false,
                }
            }
        }
    };
}

pub(crate) use impl_fields;

pub fn require_all<T: Fields>(candidate: &T, fields: &[&str]) -> bool {
    fields.iter().all(|field| candidate.has(field))
}

pub fn require_any<T: Fields>(candidate: &T, fields: &[&str]) -> bool {
    fields.iter().any(|field| candidate.has(field))
}

/// Copy of `object` without its null-valued fields.
pub fn omit_absent(object: NodeMap) -> NodeMap {
    object.into_iter().filter(|(_, value)| !value.is_null()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Sample {
        name: Option<String>,
        tags: Vec<String>,
    }

    impl_fields!(Sample {
        name => "name",
        tags => "tags",
    });

    #[test]
    fn test_is_node() {
        assert!(is_node(&json!({})));
        assert!(is_node(&json!({ "title": { "#text": "x" } })));
        assert!(!is_node(&json!(null)));
        assert!(!is_node(&json!("text")));
        assert!(!is_node(&json!(42)));
        assert!(!is_node(&json!([{ "a": 1 }])));
    }

    #[test]
    fn test_as_string_strict_rejects_numbers() {
        let value = json!({ "#text": 123 });
        let text = value.get(TEXT_KEY);
        assert_eq!(as_string(text, Mode::Strict), None);
        assert_eq!(as_string(text, Mode::Coerce), Some("123".into()));
    }

    #[test]
    fn test_as_string_coerces_booleans() {
        assert_eq!(as_string(Some(&json!(true)), Mode::Coerce), Some("true".into()));
        assert_eq!(as_string(Some(&json!(true)), Mode::Strict), None);
    }

    #[test]
    fn test_as_string_absent_and_null() {
        assert_eq!(as_string(None, Mode::Coerce), None);
        assert_eq!(as_string(Some(&Value::Null), Mode::Coerce), None);
        assert_eq!(as_string(Some(&json!({})), Mode::Coerce), None);
    }

    #[test]
    fn test_as_string_keeps_empty_string() {
        assert_eq!(as_string(Some(&json!("")), Mode::Strict), Some(String::new()));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(as_number(Some(&json!(12)), Mode::Strict), Some(12.into()));
        assert_eq!(as_number(Some(&json!("12")), Mode::Strict), None);
        assert_eq!(as_number(Some(&json!(" 12 ")), Mode::Coerce), Some(12.into()));
        assert_eq!(
            as_number(Some(&json!("1.5")), Mode::Coerce),
            Number::from_f64(1.5)
        );
        assert_eq!(as_number(Some(&json!("abc")), Mode::Coerce), None);
        assert_eq!(as_number(Some(&json!("NaN")), Mode::Coerce), None);
        assert_eq!(as_number(Some(&json!("")), Mode::Coerce), None);
        assert_eq!(as_number(None, Mode::Coerce), None);
    }

    #[test]
    fn test_as_sequence_of_wraps_single_value() {
        let single = json!({ "#text": "a" });
        let values = as_sequence_of(Some(&single), |v| as_string(v.get(TEXT_KEY), Mode::Strict));
        assert_eq!(values, vec!["a".to_string()]);
    }

    #[test]
    fn test_as_sequence_of_preserves_order_and_filters() {
        let many = json!([{ "#text": "a" }, "bare", { "#text": "b" }]);
        let values = as_sequence_of(Some(&many), |v| as_string(v.get(TEXT_KEY), Mode::Strict));
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_as_sequence_of_absent_is_empty() {
        let values: Vec<String> = as_sequence_of(None, |_| Some("x".to_string()));
        assert!(values.is_empty());
    }

    #[test]
    fn test_child_takes_first_occurrence() {
        let node = json!({ "title": [{ "#text": "first" }, { "#text": "second" }] });
        let node = as_node(&node).unwrap();
        assert_eq!(text(node, "title"), Some(&json!("first")));
    }

    #[test]
    fn test_text_and_attribute_lookup() {
        let node = json!({ "@href": "https://example.com", "#text": "own", "name": "bare" });
        let node = as_node(&node).unwrap();
        assert_eq!(attribute(node, "href"), Some(&json!("https://example.com")));
        assert_eq!(own_text(node), Some(&json!("own")));
        assert_eq!(text(node, "name"), Some(&json!("bare")));
        assert_eq!(text(node, "missing"), None);
    }

    #[test]
    fn test_require_all_and_any() {
        let empty = Sample::default();
        let named = Sample {
            name: Some("n".into()),
            tags: Vec::new(),
        };

        assert!(!require_all(&empty, &["name"]));
        assert!(require_all(&named, &["name"]));
        assert!(!require_all(&named, &["name", "tags"]));
        assert!(!require_any(&empty, Sample::FIELDS));
        assert!(require_any(&named, Sample::FIELDS));
        assert!(!named.has("unknown"));
    }

    #[test]
    fn test_omit_absent() {
        let object = json!({ "a": 1, "b": null, "c": "" });
        let object = omit_absent(object.as_object().unwrap().clone());
        assert_eq!(Value::Object(object), json!({ "a": 1, "c": "" }));
    }
}
