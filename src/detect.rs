//! Stateless format sniffing on raw document text.
//!
//! The predicates overlap (an RSS channel may embed `atom:` elements), so
//! [`detect_format`] fixes the order in which they are consulted.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(?:atom:)?feed[\s>]").expect("valid atom regex"));
static RSS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<rss[\s>]").expect("valid rss regex"));
static RDF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<rdf:rdf[\s>]").expect("valid rdf regex"));
static JSON_FEED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^\s*\{[\s\S]*"version"\s*:\s*"https?://jsonfeed\.org/version/"#)
        .expect("valid json feed regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Atom,
    Rss,
    Rdf,
    JsonFeed,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Atom => "Atom",
            Format::Rss => "RSS",
            Format::Rdf => "RDF",
            Format::JsonFeed => "JSON Feed",
        };
        f.write_str(name)
    }
}

pub fn detect_atom(text: &str) -> bool {
    ATOM_RE.is_match(text)
}

pub fn detect_rss(text: &str) -> bool {
    RSS_RE.is_match(text)
}

pub fn detect_rdf(text: &str) -> bool {
    RDF_RE.is_match(text)
}

pub fn detect_json_feed(text: &str) -> bool {
    JSON_FEED_RE.is_match(text)
}

/// JSON Feed, then RSS, then RDF, then Atom.
pub fn detect_format(text: &str) -> Option<Format> {
    if detect_json_feed(text) {
        Some(Format::JsonFeed)
    } else if detect_rss(text) {
        Some(Format::Rss)
    } else if detect_rdf(text) {
        Some(Format::Rdf)
    } else if detect_atom(text) {
        Some(Format::Atom)
    } else {
        None
    }
}
