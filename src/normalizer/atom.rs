//! Atom 0.3 and 1.0.
//!
//! The Person, Link, Generator and Source extractors double as the namespace
//! extractors for Atom elements embedded in other formats: pass options built
//! with [`ParseOptions::as_namespace`] and they read `prefix:tag` instead.

use serde_json::Value;

use super::{admit, attach, first_text, Gate, ParseOptions};
use crate::domain::{Category, Entry, Feed, Generator, Link, Person, Source};
use crate::namespaces::{dublincore, slash, syndication};
use crate::node::{
    as_node, as_number, as_sequence_of, as_string, attribute, child, own_text, require_any, text,
    Fields, NodeMap,
};

pub const NAMESPACE_PREFIX: &str = "atom:";

// Fallback chains: Atom 1.0 tag first, then its 0.3 names.
const UPDATED: &[&str] = &["updated", "modified"];
const PUBLISHED: &[&str] = &["published", "issued", "created"];
const SUBTITLE: &[&str] = &["subtitle", "tagline"];
const PERSON_URI: &[&str] = &["uri", "url"];
const GENERATOR_URI: &[&str] = &["uri", "url"];

// Atom 1.0 also requires `updated`, but too many real feeds omit it.
const FEED_GATE: Gate = Gate::All(&["id", "title"]);
const ENTRY_GATE: Gate = Gate::All(&["id", "title"]);

fn text_field(node: &NodeMap, name: &str, options: &ParseOptions) -> Option<String> {
    as_string(text(node, &options.tag(name)), options.mode)
}

fn text_chain(node: &NodeMap, chain: &[&str], options: &ParseOptions) -> Option<String> {
    first_text(chain, |name| text_field(node, name, options))
}

fn attribute_field(node: &NodeMap, name: &str, options: &ParseOptions) -> Option<String> {
    as_string(attribute(node, name), options.mode)
}

fn people(node: &NodeMap, name: &str, options: &ParseOptions) -> Vec<Person> {
    as_sequence_of(node.get(&options.tag(name)), |v| parse_person(v, options))
}

fn categories(node: &NodeMap, options: &ParseOptions) -> Vec<Category> {
    as_sequence_of(node.get(&options.tag("category")), |v| {
        parse_category(v, options)
    })
}

fn links(node: &NodeMap, options: &ParseOptions) -> Vec<Link> {
    as_sequence_of(node.get(&options.tag("link")), |v| parse_link(v, options))
}

fn generator(node: &NodeMap, options: &ParseOptions) -> Option<Generator> {
    child(node, &options.tag("generator")).and_then(|v| parse_generator(v, options))
}

pub fn parse_link(value: &Value, options: &ParseOptions) -> Option<Link> {
    let node = as_node(value)?;

    let link = Link {
        href: attribute_field(node, "href", options),
        rel: attribute_field(node, "rel", options),
        media_type: attribute_field(node, "type", options),
        hreflang: attribute_field(node, "hreflang", options),
        title: attribute_field(node, "title", options),
        length: as_number(attribute(node, "length"), options.mode),
    };

    admit(link, Gate::All(&["href"]), options)
}

pub fn parse_person(value: &Value, options: &ParseOptions) -> Option<Person> {
    let node = as_node(value)?;

    let person = Person {
        name: text_field(node, "name", options),
        uri: text_chain(node, PERSON_URI, options),
        email: text_field(node, "email", options),
    };

    admit(person, Gate::All(&["name"]), options)
}

pub fn parse_category(value: &Value, options: &ParseOptions) -> Option<Category> {
    let node = as_node(value)?;

    let category = Category {
        term: attribute_field(node, "term", options),
        scheme: attribute_field(node, "scheme", options),
        label: attribute_field(node, "label", options),
    };

    admit(category, Gate::All(&["term"]), options)
}

pub fn parse_generator(value: &Value, options: &ParseOptions) -> Option<Generator> {
    let node = as_node(value)?;

    let generator = Generator {
        text: as_string(own_text(node), options.mode),
        uri: first_text(GENERATOR_URI, |name| attribute_field(node, name, options)),
        version: attribute_field(node, "version", options),
    };

    admit(generator, Gate::All(&["text"]), options)
}

/// Source has no mandatory field: any recognized field justifies it.
pub fn parse_source(value: &Value, options: &ParseOptions) -> Option<Source> {
    let node = as_node(value)?;

    let source = Source {
        authors: people(node, "author", options),
        categories: categories(node, options),
        contributors: people(node, "contributor", options),
        generator: generator(node, options),
        icon: text_field(node, "icon", options),
        id: text_field(node, "id", options),
        links: links(node, options),
        logo: text_field(node, "logo", options),
        rights: text_field(node, "rights", options),
        subtitle: text_chain(node, SUBTITLE, options),
        title: text_field(node, "title", options),
        updated: text_chain(node, UPDATED, options),
        dc: attach(options, |mode| dublincore::extract(value, mode)),
    };

    require_any(&source, Source::FIELDS).then_some(source)
}

pub fn parse_entry(value: &Value, options: &ParseOptions) -> Option<Entry> {
    let node = as_node(value)?;

    let entry = Entry {
        authors: people(node, "author", options),
        categories: categories(node, options),
        content: text_field(node, "content", options),
        contributors: people(node, "contributor", options),
        id: text_field(node, "id", options),
        links: links(node, options),
        published: text_chain(node, PUBLISHED, options),
        rights: text_field(node, "rights", options),
        source: child(node, &options.tag("source")).and_then(|v| parse_source(v, options)),
        summary: text_field(node, "summary", options),
        title: text_field(node, "title", options),
        updated: text_chain(node, UPDATED, options),
        dc: attach(options, |mode| dublincore::extract(value, mode)),
        slash: attach(options, |mode| slash::extract(value, mode)),
        atom: None,
    };

    admit(entry, ENTRY_GATE, options)
}

pub fn parse_feed(value: &Value, options: &ParseOptions) -> Option<Feed> {
    let node = as_node(value)?;

    let feed = Feed {
        authors: people(node, "author", options),
        categories: categories(node, options),
        contributors: people(node, "contributor", options),
        generator: generator(node, options),
        icon: text_field(node, "icon", options),
        id: text_field(node, "id", options),
        links: links(node, options),
        logo: text_field(node, "logo", options),
        rights: text_field(node, "rights", options),
        subtitle: text_chain(node, SUBTITLE, options),
        title: text_field(node, "title", options),
        updated: text_chain(node, UPDATED, options),
        entries: as_sequence_of(node.get(&options.tag("entry")), |v| {
            parse_entry(v, options)
        }),
        dc: attach(options, |mode| dublincore::extract(value, mode)),
        sy: attach(options, |mode| syndication::extract(value, mode)),
        atom: None,
    };

    admit(feed, FEED_GATE, options)
}

/// Copy of `value` with `prefix` removed from its element names.
fn strip_prefix(value: &Value, prefix: &str) -> Value {
    match value {
        Value::Object(node) => Value::Object(
            node.iter()
                .map(|(key, child)| {
                    let key = key.strip_prefix(prefix).unwrap_or(key.as_str());
                    (key.to_string(), strip_prefix(child, prefix))
                })
                .collect(),
        ),
        Value::Array(values) => Value::Array(
            values
                .iter()
                .map(|value| strip_prefix(value, prefix))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Root entry point: the document must have a top-level `feed` element, or
/// an `atom:feed` one when Atom is bound to a prefix rather than being the
/// default namespace.
pub fn retrieve_feed(root: &Value, options: &ParseOptions) -> Option<Feed> {
    let root = as_node(root)?;

    if let Some(feed) = child(root, "feed") {
        return parse_feed(feed, options);
    }

    let feed = child(root, &format!("{NAMESPACE_PREFIX}feed"))?;
    parse_feed(&strip_prefix(feed, NAMESPACE_PREFIX), options)
}
