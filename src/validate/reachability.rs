use std::collections::HashSet;

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::document::StateMachineSemantics;

/// Every state must be reachable from `initial` by following
/// transitions, ignoring guards entirely (guards are opaque labels at
/// this layer, not evaluated).
pub fn unreachable_states(
    sm: &StateMachineSemantics,
    prefix: &[String],
    out: &mut Vec<Diagnostic>,
) {
    if !sm.has_state(&sm.initial) {
        // Already reported by the structural check; nothing reachable
        // to compute from a dangling initial state.
        return;
    }

    let mut reachable = HashSet::new();
    let mut frontier = vec![sm.initial.clone()];
    reachable.insert(sm.initial.clone());
    while let Some(state) = frontier.pop() {
        for transition in sm.transitions.iter().filter(|t| t.from == state) {
            if reachable.insert(transition.to.clone()) {
                frontier.push(transition.to.clone());
            }
        }
    }

    for (idx, state) in sm.states.iter().enumerate() {
        if !reachable.contains(&state.name) {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::UnreachableState,
                    format!("state `{}` is not reachable from `{}`", state.name, sm.initial),
                )
                .with_path(prefix.iter().cloned().chain([
                    "states".to_string(),
                    idx.to_string(),
                ])),
            );
        }
    }
}
