use serde::{Deserialize, Serialize};

use crate::base::Name;

/// A single state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct State {
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Name>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub parallel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<String>,
}

/// A transition between two states.
///
/// `guard` and `action` are opaque labels at this layer: the core
/// executor does not evaluate guards, only records them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transition {
    pub from: Name,
    pub to: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A finite state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateMachineSemantics {
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
    pub initial: Name,
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "final")]
    pub final_states: Vec<Name>,
}

impl StateMachineSemantics {
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.state(name).is_some()
    }

    /// Transitions leaving `from`, in declaration order, matching
    /// `event` exactly (including both being `None`). This is the
    /// selection rule `send`/`canSend` use.
    pub fn transitions_from<'a>(
        &'a self,
        from: &'a str,
        event: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions.iter().filter(move |t| {
            t.from == from && t.event.as_deref() == event
        })
    }
}
