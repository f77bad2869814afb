use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::base::Name;

/// An event's declared payload shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
}

/// A binding from an event to the action it triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Handler {
    pub event: Name,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
}

/// An event/handler interface document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsSemantics {
    pub events: IndexMap<Name, EventDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handlers: Vec<Handler>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<IndexMap<String, serde_json::Value>>,
}

impl EventsSemantics {
    pub fn has_event(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }
}
