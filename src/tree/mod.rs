//! XML text to the generic node tree.
//!
//! Element and attribute names are lower-cased, attributes become `@name`
//! keys, text and CDATA go under `#text`, and repeated siblings collapse
//! into a sequence in document order. Every element becomes a mapping, even
//! one that only holds text.

use html_escape::decode_html_entities;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value;

use crate::app::{FeedloomError, Result};
use crate::node::{Node, NodeMap, ATTRIBUTE_PREFIX, TEXT_KEY};

pub fn parse(text: &str) -> Result<Node> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut root = NodeMap::new();
    let mut stack: Vec<(String, NodeMap)> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::Empty(start) => {
                let (name, element) = open_element(&start)?;
                insert_child(current(&mut stack, &mut root), name, element);
            }
            Event::End(_) => {
                let (name, element) = stack
                    .pop()
                    .ok_or_else(|| FeedloomError::FeedParse("unexpected closing tag".into()))?;
                insert_child(current(&mut stack, &mut root), name, element);
            }
            Event::Text(raw) => {
                if let Some((_, element)) = stack.last_mut() {
                    let raw = std::str::from_utf8(&raw)?;
                    append_text(element, &decode_html_entities(raw));
                }
            }
            Event::CData(raw) => {
                if let Some((_, element)) = stack.last_mut() {
                    append_text(element, std::str::from_utf8(&raw)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((name, _)) = stack.last() {
        return Err(FeedloomError::FeedParse(format!("unclosed element <{name}>")));
    }

    Ok(Value::Object(root))
}

fn open_element(start: &BytesStart) -> Result<(String, NodeMap)> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_lowercase();
    let mut element = NodeMap::new();

    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_lowercase();
        let value = std::str::from_utf8(&attribute.value)?;
        element.insert(
            format!("{ATTRIBUTE_PREFIX}{key}"),
            Value::String(decode_html_entities(value).into_owned()),
        );
    }

    Ok((name, element))
}

fn current<'a>(stack: &'a mut [(String, NodeMap)], root: &'a mut NodeMap) -> &'a mut NodeMap {
    match stack.last_mut() {
        Some((_, element)) => element,
        None => root,
    }
}

fn insert_child(parent: &mut NodeMap, name: String, element: NodeMap) {
    let element = Value::Object(element);

    match parent.get_mut(&name) {
        Some(Value::Array(siblings)) => siblings.push(element),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, element]);
        }
        None => {
            parent.insert(name, element);
        }
    }
}

fn append_text(element: &mut NodeMap, text: &str) {
    match element.get_mut(TEXT_KEY) {
        Some(Value::String(existing)) => existing.push_str(text),
        _ => {
            element.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
    }
}
