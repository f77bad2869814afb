use serde::{Deserialize, Serialize};

use crate::base::Name;

/// A single message exchanged between two participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    pub from: Name,
    pub to: Name,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// A message-sequence interaction document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractionSemantics {
    pub participants: Vec<Name>,
    pub messages: Vec<Message>,
}

impl InteractionSemantics {
    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }
}
