use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::node::{as_node, as_number, as_string, impl_fields, require_any, text, Fields, Mode};

pub const PREFIX: &str = "slash:";

/// Slash module: discussion metadata on entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slash {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_parade: Option<String>,
}

impl_fields!(Slash {
    section => "section",
    department => "department",
    comments => "comments",
    hit_parade => "hit_parade",
});

pub fn extract(value: &Value, mode: Mode) -> Option<Slash> {
    let node = as_node(value)?;
    let tag = |name: &str| text(node, &format!("{PREFIX}{name}"));

    let slash = Slash {
        section: as_string(tag("section"), mode),
        department: as_string(tag("department"), mode),
        comments: as_number(tag("comments"), mode),
        hit_parade: as_string(tag("hit_parade"), mode),
    };

    require_any(&slash, Slash::FIELDS).then_some(slash)
}
