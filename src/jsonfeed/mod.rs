//! JSON Feed 1.1 model and its projection from the canonical feed model.
//!
//! Optional scalars serialize as `null` here on purpose; [`generate_feed`]
//! strips them on the way out.

pub mod generate;

pub use generate::{generate_feed, generate_item, generate_rfc3339_date};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use sha2::{Digest, Sha256};

use crate::domain::{self, Link, Person};

pub const VERSION: &str = "https://jsonfeed.org/version/1.1";

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub home_page_url: Option<String>,
    pub feed_url: Option<String>,
    pub description: Option<String>,
    pub user_comment: Option<String>,
    pub next_url: Option<String>,
    pub icon: Option<String>,
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub authors: Vec<Author>,
    pub language: Option<String>,
    pub expired: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hubs: Vec<Hub>,
    #[serde(skip_serializing, default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub url: Option<String>,
    pub external_url: Option<String>,
    pub title: Option<String>,
    pub content_html: Option<String>,
    pub content_text: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub banner_image: Option<String>,
    pub date_published: Option<DateTime<Utc>>,
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub authors: Vec<Author>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// Parse an RFC 3339 or RFC 2822 timestamp.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

impl From<&Person> for Author {
    fn from(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            url: person.uri.clone(),
            avatar: None,
        }
    }
}

impl Attachment {
    fn from_enclosure(link: &Link) -> Option<Self> {
        Some(Self {
            url: link.href.clone()?,
            mime_type: link
                .media_type
                .clone()
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            title: link.title.clone(),
            size_in_bytes: link.length.clone(),
            duration_in_seconds: None,
        })
    }
}

/// Deterministic id for an entry that has neither an id nor a link.
fn content_id(entry: &domain::Entry) -> String {
    let mut hasher = Sha256::new();
    for field in [&entry.title, &entry.summary, &entry.content, &entry.published] {
        hasher.update(field.as_deref().unwrap_or_default().as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}

impl From<&domain::Entry> for Item {
    fn from(entry: &domain::Entry) -> Self {
        let url = entry.permalink().map(String::from);
        let id = entry
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| url.clone())
            .unwrap_or_else(|| content_id(entry));

        Self {
            id,
            url,
            title: entry.title.clone(),
            content_html: entry.content.clone(),
            summary: entry.summary.clone(),
            date_published: entry.published.as_deref().and_then(parse_date),
            date_modified: entry.updated.as_deref().and_then(parse_date),
            authors: entry.authors.iter().map(Author::from).collect(),
            tags: entry.categories.iter().filter_map(|c| c.term.clone()).collect(),
            language: entry.dc.as_ref().and_then(|dc| dc.language.clone()),
            attachments: entry
                .links
                .iter()
                .filter(|link| link.has_rel("enclosure"))
                .filter_map(Attachment::from_enclosure)
                .collect(),
            ..Default::default()
        }
    }
}

impl From<&domain::Feed> for Feed {
    fn from(feed: &domain::Feed) -> Self {
        // RSS channels usually declare self and hub links as atom:link.
        let links: Vec<&Link> = feed
            .links
            .iter()
            .chain(feed.atom.iter().flat_map(|atom| atom.links.iter()))
            .collect();
        let href_of = |rel: &str| {
            links
                .iter()
                .find(|link| link.has_rel(rel))
                .and_then(|link| link.href.clone())
        };

        Self {
            title: feed.title.clone().unwrap_or_default(),
            home_page_url: feed.home_page().map(String::from),
            feed_url: href_of("self"),
            description: feed.subtitle.clone(),
            icon: feed.logo.clone(),
            favicon: feed.icon.clone(),
            authors: feed.authors.iter().map(Author::from).collect(),
            language: feed.dc.as_ref().and_then(|dc| dc.language.clone()),
            hubs: links
                .iter()
                .filter(|link| link.has_rel("hub"))
                .filter_map(|link| link.href.clone())
                .map(|url| Hub {
                    kind: "WebSub".to_string(),
                    url,
                })
                .collect(),
            items: feed.entries.iter().map(Item::from).collect(),
            ..Default::default()
        }
    }
}
