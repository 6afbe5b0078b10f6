//! RSS 0.9x, 2.0 and RDF (RSS 1.0), normalized into the canonical model.

use serde_json::Value;

use super::{admit, atom, attach, first_match, first_text, Gate, ParseOptions};
use crate::domain::{Category, Entry, Feed, Generator, Link, Person, Source};
use crate::namespaces::{dublincore, slash, syndication};
use crate::node::{
    as_node, as_number, as_sequence_of, as_string, attribute, child, own_text, require_any, text,
    Fields, NodeMap,
};

const FEED_UPDATED: &[&str] = &["lastbuilddate", "pubdate", "dc:date"];
const ENTRY_PUBLISHED: &[&str] = &["pubdate", "dc:date"];
const ENTRY_AUTHORS: &[&str] = &["author", "dc:creator"];

const FEED_GATE: Gate = Gate::All(&["title"]);
// RSS 2.0: an item needs a title or a description.
const ENTRY_GATE: Gate = Gate::Any(&["title", "summary"]);

fn text_field(node: &NodeMap, name: &str, options: &ParseOptions) -> Option<String> {
    as_string(text(node, &options.tag(name)), options.mode)
}

/// Split `email (Name)` into its parts; anything else is taken as a name.
fn split_person(raw: &str) -> Person {
    if let Some((email, rest)) = raw.split_once('(') {
        let email = email.trim();
        if let Some(name) = rest.trim_end().strip_suffix(')') {
            if email.contains('@') && !name.trim().is_empty() {
                return Person {
                    name: Some(name.trim().to_string()),
                    uri: None,
                    email: Some(email.to_string()),
                };
            }
        }
    }

    Person {
        name: Some(raw.to_string()),
        ..Default::default()
    }
}

pub fn parse_person(value: &Value, options: &ParseOptions) -> Option<Person> {
    let node = as_node(value)?;
    let raw = as_string(own_text(node), options.mode)?;

    admit(split_person(raw.trim()), Gate::All(&["name"]), options)
}

pub fn parse_category(value: &Value, options: &ParseOptions) -> Option<Category> {
    let node = as_node(value)?;

    let category = Category {
        term: as_string(own_text(node), options.mode),
        scheme: as_string(attribute(node, "domain"), options.mode),
        label: None,
    };

    admit(category, Gate::All(&["term"]), options)
}

fn parse_text_link(value: &Value, rel: &str, options: &ParseOptions) -> Option<Link> {
    let node = as_node(value)?;

    let link = Link {
        href: as_string(own_text(node), options.mode),
        rel: Some(rel.to_string()),
        ..Default::default()
    };

    admit(link, Gate::All(&["href"]), options)
}

pub fn parse_enclosure(value: &Value, options: &ParseOptions) -> Option<Link> {
    let node = as_node(value)?;

    let link = Link {
        href: as_string(attribute(node, "url"), options.mode),
        rel: Some("enclosure".to_string()),
        media_type: as_string(attribute(node, "type"), options.mode),
        length: as_number(attribute(node, "length"), options.mode),
        ..Default::default()
    };

    admit(link, Gate::All(&["href"]), options)
}

pub fn parse_generator(value: &Value, options: &ParseOptions) -> Option<Generator> {
    let node = as_node(value)?;

    let generator = Generator {
        text: as_string(own_text(node), options.mode),
        ..Default::default()
    };

    admit(generator, Gate::All(&["text"]), options)
}

/// `<source url="...">Title</source>` names the channel an item came from.
pub fn parse_source(value: &Value, options: &ParseOptions) -> Option<Source> {
    let node = as_node(value)?;

    let href = as_string(attribute(node, "url"), options.mode);
    let source = Source {
        title: as_string(own_text(node), options.mode),
        links: href
            .map(|href| Link {
                href: Some(href),
                ..Default::default()
            })
            .into_iter()
            .collect(),
        ..Default::default()
    };

    require_any(&source, Source::FIELDS).then_some(source)
}

fn parse_image_url(value: &Value, options: &ParseOptions) -> Option<String> {
    let node = as_node(value)?;
    text_field(node, "url", options)
}

fn people(node: &NodeMap, name: &str, options: &ParseOptions) -> Vec<Person> {
    as_sequence_of(node.get(&options.tag(name)), |v| parse_person(v, options))
}

fn categories(node: &NodeMap, options: &ParseOptions) -> Vec<Category> {
    as_sequence_of(node.get(&options.tag("category")), |v| {
        parse_category(v, options)
    })
}

pub fn parse_item(value: &Value, options: &ParseOptions) -> Option<Entry> {
    let node = as_node(value)?;

    let mut links = as_sequence_of(node.get("link"), |v| {
        parse_text_link(v, "alternate", options)
    });
    links.extend(as_sequence_of(node.get("enclosure"), |v| {
        parse_enclosure(v, options)
    }));
    links.extend(as_sequence_of(node.get("comments"), |v| {
        parse_text_link(v, "replies", options)
    }));

    let authors = first_match(ENTRY_AUTHORS, |name| {
        let found = people(node, name, options);
        (!found.is_empty()).then_some(found)
    });

    let entry = Entry {
        authors: authors.unwrap_or_default(),
        categories: categories(node, options),
        content: text_field(node, "content:encoded", options),
        id: text_field(node, "guid", options),
        links,
        published: first_text(ENTRY_PUBLISHED, |name| text_field(node, name, options)),
        source: child(node, "source").and_then(|v| parse_source(v, options)),
        summary: text_field(node, "description", options),
        title: text_field(node, "title", options),
        dc: attach(options, |mode| dublincore::extract(value, mode)),
        slash: attach(options, |mode| slash::extract(value, mode)),
        atom: attach(options, |mode| {
            let embedded = ParseOptions::new(mode).as_namespace(atom::NAMESPACE_PREFIX);
            atom::parse_entry(value, &embedded).map(Box::new)
        }),
        ..Default::default()
    };

    admit(entry, ENTRY_GATE, options)
}

/// Build a feed from a channel whose items may live elsewhere (RDF keeps
/// them next to the channel rather than inside it).
fn build_feed(channel: &Value, items: Option<&Value>, options: &ParseOptions) -> Option<Feed> {
    let node = as_node(channel)?;
    let items = items.or_else(|| node.get("item"));

    let feed = Feed {
        authors: people(node, "managingeditor", options),
        categories: categories(node, options),
        contributors: people(node, "webmaster", options),
        generator: child(node, "generator").and_then(|v| parse_generator(v, options)),
        links: as_sequence_of(node.get("link"), |v| {
            parse_text_link(v, "alternate", options)
        }),
        logo: child(node, "image").and_then(|v| parse_image_url(v, options)),
        rights: text_field(node, "copyright", options),
        subtitle: text_field(node, "description", options),
        title: text_field(node, "title", options),
        updated: first_text(FEED_UPDATED, |name| text_field(node, name, options)),
        entries: as_sequence_of(items, |v| parse_item(v, options)),
        dc: attach(options, |mode| dublincore::extract(channel, mode)),
        sy: attach(options, |mode| syndication::extract(channel, mode)),
        atom: attach(options, |mode| {
            let embedded = ParseOptions::new(mode).as_namespace(atom::NAMESPACE_PREFIX);
            atom::parse_feed(channel, &embedded).map(Box::new)
        }),
        ..Default::default()
    };

    admit(feed, FEED_GATE, options)
}

pub fn parse_feed(value: &Value, options: &ParseOptions) -> Option<Feed> {
    build_feed(value, None, options)
}

/// Root entry point: `rss > channel`, `rdf:rdf > channel` or a bare
/// top-level `channel`.
pub fn retrieve_feed(root: &Value, options: &ParseOptions) -> Option<Feed> {
    let root = as_node(root)?;

    if let Some(rss) = root.get("rss").and_then(as_node) {
        return parse_feed(child(rss, "channel")?, options);
    }

    if let Some(rdf) = root.get("rdf:rdf").and_then(as_node) {
        return build_feed(child(rdf, "channel")?, rdf.get("item"), options);
    }

    parse_feed(child(root, "channel")?, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Mode;
    use serde_json::json;

    fn coerce() -> ParseOptions {
        ParseOptions::new(Mode::Coerce)
    }

    fn channel() -> Value {
        json!({
            "title": { "#text": "Channel" },
            "link": { "#text": "https://example.com/" },
            "description": { "#text": "About" },
        })
    }

    #[test]
    fn test_split_person() {
        let person = split_person("jo@example.com (Jo Example)");
        assert_eq!(person.name.as_deref(), Some("Jo Example"));
        assert_eq!(person.email.as_deref(), Some("jo@example.com"));

        let person = split_person("Jo Example");
        assert_eq!(person.name.as_deref(), Some("Jo Example"));
        assert_eq!(person.email, None);

        let person = split_person("Jo (the editor)");
        assert_eq!(person.name.as_deref(), Some("Jo (the editor)"));
    }

    #[test]
    fn test_channel_fields() {
        let mut value = channel();
        let node = value.as_object_mut().unwrap();
        node.insert("copyright".into(), json!({ "#text": "CC-BY" }));
        node.insert("managingeditor".into(), json!({ "#text": "ed@example.com (Ed)" }));
        node.insert("generator".into(), json!({ "#text": "Hugo" }));
        node.insert("image".into(), json!({ "url": { "#text": "https://example.com/logo.png" } }));
        node.insert("category".into(), json!({ "#text": "Cat 1", "@domain": "http://www.example.com/cusips" }));

        let feed = parse_feed(&value, &coerce()).unwrap();
        assert_eq!(feed.title.as_deref(), Some("Channel"));
        assert_eq!(feed.subtitle.as_deref(), Some("About"));
        assert_eq!(feed.rights.as_deref(), Some("CC-BY"));
        assert_eq!(feed.home_page(), Some("https://example.com/"));
        assert_eq!(feed.authors[0].email.as_deref(), Some("ed@example.com"));
        assert_eq!(feed.generator.unwrap().text.as_deref(), Some("Hugo"));
        assert_eq!(feed.logo.as_deref(), Some("https://example.com/logo.png"));
        assert_eq!(
            feed.categories,
            vec![Category {
                term: Some("Cat 1".into()),
                scheme: Some("http://www.example.com/cusips".into()),
                label: None,
            }]
        );
    }

    #[test]
    fn test_channel_updated_chain() {
        let mut value = channel();
        let node = value.as_object_mut().unwrap();
        node.insert("pubdate".into(), json!({ "#text": "Mon, 01 Jan 2024 00:00:00 GMT" }));
        node.insert("lastbuilddate".into(), json!({ "#text": "Tue, 02 Jan 2024 00:00:00 GMT" }));

        let feed = parse_feed(&value, &coerce()).unwrap();
        assert_eq!(feed.updated.as_deref(), Some("Tue, 02 Jan 2024 00:00:00 GMT"));
    }

    #[test]
    fn test_empty_dates_fall_through() {
        let mut value = channel();
        let node = value.as_object_mut().unwrap();
        node.insert("lastbuilddate".into(), json!({ "#text": "" }));
        node.insert("pubdate".into(), json!({ "#text": "Mon, 01 Jan 2024 00:00:00 GMT" }));
        node.insert(
            "item".into(),
            json!({
                "title": { "#text": "One" },
                "pubdate": { "#text": "" },
                "dc:date": { "#text": "2024-01-01T00:00:00Z" },
            }),
        );

        let feed = parse_feed(&value, &coerce()).unwrap();
        assert_eq!(feed.updated.as_deref(), Some("Mon, 01 Jan 2024 00:00:00 GMT"));
        assert_eq!(feed.entries[0].published.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_channel_requires_title() {
        let value = json!({ "link": { "#text": "https://example.com/" } });
        assert!(parse_feed(&value, &coerce()).is_none());
    }

    #[test]
    fn test_item_fields() {
        let value = json!({
            "title": { "#text": "Episode" },
            "link": { "#text": "https://example.com/ep1" },
            "guid": { "#text": "ep-1", "@ispermalink": "false" },
            "description": { "#text": "Summary" },
            "content:encoded": { "#text": "<p>Body</p>" },
            "pubdate": { "#text": "Mon, 01 Jan 2024 12:00:00 GMT" },
            "author": { "#text": "jo@example.com (Jo)" },
            "enclosure": { "@url": "https://example.com/ep1.mp3", "@type": "audio/mpeg", "@length": "12345" },
            "comments": { "#text": "https://example.com/ep1#comments" },
            "source": { "#text": "Upstream", "@url": "https://upstream.example.com/rss" },
            "slash:comments": { "#text": "7" },
        });

        let entry = parse_item(&value, &coerce()).unwrap();
        assert_eq!(entry.id.as_deref(), Some("ep-1"));
        assert_eq!(entry.summary.as_deref(), Some("Summary"));
        assert_eq!(entry.content.as_deref(), Some("<p>Body</p>"));
        assert_eq!(entry.published.as_deref(), Some("Mon, 01 Jan 2024 12:00:00 GMT"));
        assert_eq!(entry.authors[0].name.as_deref(), Some("Jo"));

        let rels: Vec<_> = entry.links.iter().map(|l| l.rel.as_deref()).collect();
        assert_eq!(rels, vec![Some("alternate"), Some("enclosure"), Some("replies")]);
        assert_eq!(entry.links[1].length, Some(12345.into()));

        let source = entry.source.unwrap();
        assert_eq!(source.title.as_deref(), Some("Upstream"));
        assert_eq!(source.links[0].href.as_deref(), Some("https://upstream.example.com/rss"));
        assert_eq!(entry.slash.unwrap().comments, Some(7.into()));
    }

    #[test]
    fn test_item_gate_title_or_description() {
        let description_only = json!({ "description": { "#text": "Only text" } });
        assert!(parse_item(&description_only, &coerce()).is_some());

        let link_only = json!({ "link": { "#text": "https://example.com/x" } });
        assert!(parse_item(&link_only, &coerce()).is_none());
    }

    #[test]
    fn test_item_author_falls_back_to_dc_creator() {
        let value = json!({
            "title": { "#text": "Post" },
            "dc:creator": [{ "#text": "Jo" }, { "#text": "Sam" }],
        });
        let entry = parse_item(&value, &coerce()).unwrap();
        let names: Vec<_> = entry.authors.iter().map(|a| a.name.as_deref()).collect();
        assert_eq!(names, vec![Some("Jo"), Some("Sam")]);
        assert_eq!(entry.dc.unwrap().creator.as_deref(), Some("Jo"));
    }

    #[test]
    fn test_embedded_atom_elements() {
        let mut value = channel();
        let node = value.as_object_mut().unwrap();
        node.insert(
            "atom:link".into(),
            json!({ "@href": "https://example.com/feed.xml", "@rel": "self", "@type": "application/rss+xml" }),
        );
        node.insert("dc:language".into(), json!({ "#text": "en" }));

        let feed = parse_feed(&value, &coerce()).unwrap();
        let embedded = feed.atom.unwrap();
        assert_eq!(embedded.links[0].rel.as_deref(), Some("self"));
        assert!(embedded.dc.is_none());
        assert!(embedded.sy.is_none());
        assert_eq!(feed.dc.unwrap().language.as_deref(), Some("en"));
    }

    #[test]
    fn test_no_atom_payload_without_atom_tags() {
        let feed = parse_feed(&channel(), &coerce()).unwrap();
        assert!(feed.atom.is_none());
        assert!(feed.dc.is_none());
        assert!(feed.sy.is_none());
    }

    #[test]
    fn test_retrieve_feed_rss_root() {
        let mut chan = channel();
        chan.as_object_mut().unwrap().insert(
            "item".into(),
            json!([
                { "title": { "#text": "First" } },
                { "title": { "#text": "Second" } },
            ]),
        );
        let root = json!({ "rss": { "@version": "2.0", "channel": chan } });

        let feed = retrieve_feed(&root, &coerce()).unwrap();
        let titles: Vec<_> = feed.entries.iter().map(|e| e.display_title()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_retrieve_feed_rdf_root() {
        let root = json!({
            "rdf:rdf": {
                "channel": channel(),
                "item": { "title": { "#text": "Sibling item" } },
            }
        });

        let feed = retrieve_feed(&root, &coerce()).unwrap();
        assert_eq!(feed.entries.len(), 1);
        assert_eq!(feed.entries[0].title.as_deref(), Some("Sibling item"));
    }

    #[test]
    fn test_retrieve_feed_bare_channel() {
        let root = json!({ "channel": channel() });
        assert!(retrieve_feed(&root, &coerce()).is_some());
        assert!(retrieve_feed(&json!({ "feed": {} }), &coerce()).is_none());
        assert!(retrieve_feed(&json!("rss"), &coerce()).is_none());
    }
}
