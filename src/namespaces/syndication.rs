use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::node::{as_node, as_number, as_string, impl_fields, require_any, text, Fields, Mode};

pub const PREFIX: &str = "sy:";

/// Syndication module: how often a channel is expected to update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syndication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_frequency: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_base: Option<String>,
}

impl_fields!(Syndication {
    update_period => "updatePeriod",
    update_frequency => "updateFrequency",
    update_base => "updateBase",
});

pub fn extract(value: &Value, mode: Mode) -> Option<Syndication> {
    let node = as_node(value)?;
    let tag = |name: &str| text(node, &format!("{PREFIX}{name}"));

    let sy = Syndication {
        update_period: as_string(tag("updateperiod"), mode),
        update_frequency: as_number(tag("updatefrequency"), mode),
        update_base: as_string(tag("updatebase"), mode),
    };

    require_any(&sy, Syndication::FIELDS).then_some(sy)
}
