use std::sync::Arc;

use crate::base::Name;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::document::StateMachineSemantics;

/// An immutable handle over a running state machine.
///
/// Every [`StateMachineInstance::send`] returns a fresh instance rather
/// than mutating the receiver, so two instances can be held, compared,
/// or branched from the same point without aliasing concerns. Cloning
/// is cheap: the machine definition is `Arc`-shared, and only the
/// per-instance `history`/`actions` vectors are owned.
#[derive(Debug, Clone, PartialEq)]
pub struct StateMachineInstance {
    definition: Arc<StateMachineSemantics>,
    current_state: Name,
    history: Vec<Name>,
    actions: Vec<String>,
}

impl StateMachineInstance {
    /// Construct a fresh instance at the machine's `initial` state.
    ///
    /// `history` starts as `[initial]`; `actions` starts as
    /// `[entry(initial)]` if the initial state declares an `entry`
    /// action.
    pub fn new(definition: StateMachineSemantics) -> Self {
        Self::from_arc(Arc::new(definition))
    }

    pub fn from_arc(definition: Arc<StateMachineSemantics>) -> Self {
        let initial = definition.initial.clone();
        let actions = definition
            .state(&initial)
            .and_then(|state| state.entry.clone())
            .into_iter()
            .collect();
        Self { history: vec![initial.clone()], current_state: initial, definition, actions }
    }

    /// The originating machine, so a host can inspect it without
    /// re-threading it through every call.
    pub fn definition(&self) -> &Arc<StateMachineSemantics> {
        &self.definition
    }

    pub fn current_state(&self) -> &Name {
        &self.current_state
    }

    /// Every state visited so far, including the initial one.
    pub fn history(&self) -> &[Name] {
        &self.history
    }

    /// Actions executed on the most recent step (or at construction):
    /// the source's `exit`, then the transition's `action`, then the
    /// destination's `entry`, in that order, each only if present.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Whether some transition from the current state is enabled for
    /// `event`. Guards are opaque labels here, not evaluated, matching
    /// `send`; a richer guard-evaluating executor must keep this
    /// consistent with `send`.
    pub fn can_send(&self, event: Option<&str>) -> bool {
        self.definition.transitions_from(&self.current_state, event).next().is_some()
    }

    /// Step the machine by one event, returning a fresh instance.
    ///
    /// Among transitions matching the current state and `event`, the
    /// first one in declaration order fires. Fails with
    /// [`DiagnosticCode::NoTransition`] if none match.
    pub fn send(&self, event: Option<&str>) -> Result<Self, Diagnostic> {
        let transition = self
            .definition
            .transitions_from(&self.current_state, event)
            .next()
            .ok_or_else(|| {
                Diagnostic::new(
                    DiagnosticCode::NoTransition,
                    format!(
                        "no transition from `{}` on {}",
                        self.current_state,
                        event.map(|e| format!("`{e}`")).unwrap_or_else(|| "no event".to_string())
                    ),
                )
            })?;

        let mut actions = Vec::new();
        if let Some(exit) = self.definition.state(&self.current_state).and_then(|s| s.exit.as_ref()) {
            actions.push(exit.clone());
        }
        if let Some(action) = &transition.action {
            actions.push(action.clone());
        }
        let destination = transition.to.clone();
        if let Some(entry) = self.definition.state(&destination).and_then(|s| s.entry.as_ref()) {
            actions.push(entry.clone());
        }

        let mut history = self.history.clone();
        history.push(destination.clone());

        Ok(Self { definition: self.definition.clone(), current_state: destination, history, actions })
    }

    pub fn is_in_final_state(&self) -> bool {
        self.definition.final_states.iter().any(|s| s == &self.current_state)
    }
}
