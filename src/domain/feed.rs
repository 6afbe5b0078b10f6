use serde::{Deserialize, Serialize};

use crate::domain::{Category, Generator, Link, Person};
use crate::namespaces::{DublinCore, Slash, Syndication};
use crate::node::impl_fields;

/// A normalized feed, whatever dialect it was read from.
///
/// Namespace payloads (`dc`, `sy`, `atom`) are only present when the
/// corresponding tags carried at least one recognized value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub authors: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contributors: Vec<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<Generator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub entries: Vec<Entry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc: Option<DublinCore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sy: Option<Syndication>,
    /// Atom elements embedded in a non-Atom feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atom: Option<Box<Feed>>,
}

impl_fields!(Feed {
    authors => "authors",
    categories => "categories",
    contributors => "contributors",
    generator => "generator",
    icon => "icon",
    id => "id",
    links => "links",
    logo => "logo",
    rights => "rights",
    subtitle => "subtitle",
    title => "title",
    updated => "updated",
    entries => "entries",
    dc => "dc",
    sy => "sy",
    atom => "atom",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub authors: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contributors: Vec<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc: Option<DublinCore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slash: Option<Slash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atom: Option<Box<Entry>>,
}

impl_fields!(Entry {
    authors => "authors",
    categories => "categories",
    content => "content",
    contributors => "contributors",
    id => "id",
    links => "links",
    published => "published",
    rights => "rights",
    source => "source",
    summary => "summary",
    title => "title",
    updated => "updated",
    dc => "dc",
    slash => "slash",
    atom => "atom",
});

/// Metadata of the feed an entry was copied from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub authors: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contributors: Vec<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<Generator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc: Option<DublinCore>,
}

impl_fields!(Source {
    authors => "authors",
    categories => "categories",
    contributors => "contributors",
    generator => "generator",
    icon => "icon",
    id => "id",
    links => "links",
    logo => "logo",
    rights => "rights",
    subtitle => "subtitle",
    title => "title",
    updated => "updated",
    dc => "dc",
});

impl Feed {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    /// First alternate link, the feed's home page.
    pub fn home_page(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.is_alternate())
            .and_then(|link| link.href.as_deref())
    }
}

impl Entry {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    /// Get the best available body for display
    pub fn display_content(&self) -> &str {
        self.content
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or("")
    }

    pub fn permalink(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.is_alternate())
            .and_then(|link| link.href.as_deref())
    }
}
