use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{Feed, Item, VERSION};
use crate::app::{FeedloomError, Result};
use crate::node::{omit_absent, NodeMap};

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn generate_rfc3339_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn to_object<T: Serialize>(value: &T) -> Result<NodeMap> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(FeedloomError::Other(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

pub fn generate_item(item: &Item) -> Result<NodeMap> {
    let mut fields = to_object(item)?;

    let dates = [
        ("date_published", &item.date_published),
        ("date_modified", &item.date_modified),
    ];
    for (key, date) in dates {
        let formatted = date
            .as_ref()
            .map(|date| Value::String(generate_rfc3339_date(date)))
            .unwrap_or(Value::Null);
        fields.insert(key.to_string(), formatted);
    }

    Ok(omit_absent(fields))
}

/// Wire object for `feed`: `version` first, then the present feed fields,
/// then `items` in order.
pub fn generate_feed(feed: &Feed) -> Result<Value> {
    let mut output = NodeMap::new();
    output.insert("version".to_string(), Value::String(VERSION.to_string()));
    output.extend(omit_absent(to_object(feed)?));

    let items = feed
        .items
        .iter()
        .map(|item| generate_item(item).map(Value::Object))
        .collect::<Result<Vec<_>>>()?;
    output.insert("items".to_string(), Value::Array(items));

    Ok(Value::Object(output))
}
