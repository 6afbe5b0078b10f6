use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::{as_node, as_string, impl_fields, require_any, text, Fields, Mode};

pub const PREFIX: &str = "dc:";

/// Dublin Core element set attached to feeds, entries and sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DublinCore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
}

impl_fields!(DublinCore {
    title => "title",
    creator => "creator",
    subject => "subject",
    description => "description",
    publisher => "publisher",
    contributor => "contributor",
    date => "date",
    kind => "type",
    format => "format",
    identifier => "identifier",
    source => "source",
    language => "language",
    relation => "relation",
    coverage => "coverage",
    rights => "rights",
});

pub fn extract(value: &Value, mode: Mode) -> Option<DublinCore> {
    let node = as_node(value)?;
    let field = |name: &str| as_string(text(node, &format!("{PREFIX}{name}")), mode);

    let dc = DublinCore {
        title: field("title"),
        creator: field("creator"),
        subject: field("subject"),
        description: field("description"),
        publisher: field("publisher"),
        contributor: field("contributor"),
        date: field("date"),
        kind: field("type"),
        format: field("format"),
        identifier: field("identifier"),
        source: field("source"),
        language: field("language"),
        relation: field("relation"),
        coverage: field("coverage"),
        rights: field("rights"),
    };

    require_any(&dc, DublinCore::FIELDS).then_some(dc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complete_element_set() {
        let value = json!({
            "dc:title": { "#text": "Sample Title" },
            "dc:creator": { "#text": "John Doe" },
            "dc:subject": { "#text": "Test Subject" },
            "dc:description": { "#text": "This is a description" },
            "dc:publisher": { "#text": "Test Publisher" },
            "dc:contributor": { "#text": "Jane Smith" },
            "dc:date": { "#text": "2023-05-15T09:30:00Z" },
            "dc:type": { "#text": "Article" },
            "dc:format": { "#text": "text/html" },
            "dc:identifier": { "#text": "urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a" },
            "dc:source": { "#text": "https://example.org/source" },
            "dc:language": { "#text": "en-US" },
            "dc:relation": { "#text": "https://example.org/related" },
            "dc:coverage": { "#text": "Worldwide" },
            "dc:rights": { "#text": "Copyright 2023, All rights reserved" },
        });

        let dc = extract(&value, Mode::Coerce).unwrap();
        assert_eq!(dc.title.as_deref(), Some("Sample Title"));
        assert_eq!(dc.kind.as_deref(), Some("Article"));
        assert_eq!(dc.rights.as_deref(), Some("Copyright 2023, All rights reserved"));
        assert!(DublinCore::FIELDS.iter().all(|field| dc.has(field)));
    }

    #[test]
    fn test_partial_element_set() {
        let value = json!({
            "dc:title": { "#text": "Sample Title" },
            "dc:creator": { "#text": "John Doe" },
            "dc:date": { "#text": "2023-05-15T09:30:00Z" },
        });
        let expected = DublinCore {
            title: Some("Sample Title".into()),
            creator: Some("John Doe".into()),
            date: Some("2023-05-15T09:30:00Z".into()),
            ..Default::default()
        };

        assert_eq!(extract(&value, Mode::Coerce), Some(expected));
    }

    #[test]
    fn test_coercible_values() {
        let value = json!({
            "dc:title": { "#text": 123 },
            "dc:identifier": { "#text": 456 },
            "dc:date": { "#text": true },
        });

        let dc = extract(&value, Mode::Coerce).unwrap();
        assert_eq!(dc.title.as_deref(), Some("123"));
        assert_eq!(dc.identifier.as_deref(), Some("456"));
        assert_eq!(dc.date.as_deref(), Some("true"));

        assert_eq!(extract(&value, Mode::Strict), None);
    }

    #[test]
    fn test_empty_object_yields_nothing() {
        assert_eq!(extract(&json!({}), Mode::Coerce), None);
    }

    #[test]
    fn test_non_object_yields_nothing() {
        assert_eq!(extract(&json!("not an object"), Mode::Coerce), None);
        assert_eq!(extract(&Value::Null, Mode::Coerce), None);
        assert_eq!(extract(&json!([]), Mode::Coerce), None);
    }

    #[test]
    fn test_foreign_tags_are_ignored() {
        let value = json!({
            "other:property": { "#text": "value" },
            "unknown:field": { "#text": "data" },
        });

        assert_eq!(extract(&value, Mode::Coerce), None);
    }

    #[test]
    fn test_missing_text_is_skipped() {
        let value = json!({
            "dc:title": {},
            "dc:creator": { "#text": "John Doe" },
        });

        let dc = extract(&value, Mode::Coerce).unwrap();
        assert_eq!(dc.title, None);
        assert_eq!(dc.creator.as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_empty_strings_are_kept() {
        let value = json!({
            "dc:title": { "#text": "" },
            "dc:creator": { "#text": "John Doe" },
        });

        let dc = extract(&value, Mode::Coerce).unwrap();
        assert_eq!(dc.title.as_deref(), Some(""));
    }

    #[test]
    fn test_all_null_values_yield_nothing() {
        let value = json!({
            "dc:title": { "#text": null },
            "dc:creator": { "#text": null },
            "dc:subject": { "#text": null },
        });

        assert_eq!(extract(&value, Mode::Coerce), None);
    }
}
