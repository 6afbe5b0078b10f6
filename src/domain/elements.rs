use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::node::impl_fields;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl_fields!(Person {
    name => "name",
    uri => "uri",
    email => "email",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Number>,
}

impl_fields!(Link {
    href => "href",
    rel => "rel",
    media_type => "type",
    hreflang => "hreflang",
    title => "title",
    length => "length",
});

impl Link {
    /// A link counts as an alternate when it says so or names no relation.
    pub fn is_alternate(&self) -> bool {
        matches!(self.rel.as_deref(), None | Some("alternate"))
    }

    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel.as_deref() == Some(rel)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl_fields!(Category {
    term => "term",
    scheme => "scheme",
    label => "label",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl_fields!(Generator {
    text => "text",
    uri => "uri",
    version => "version",
});
