use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::document::StateMachineSemantics;

/// Warn when two transitions share `(from, event)` and their guards
/// cannot be statically proven disjoint.
///
/// Guards are opaque strings: there is no guard expression language to
/// reason about here, so this is deliberately conservative. Two guarded
/// transitions are only treated as safely disjoint when both have a
/// guard and the guards are byte-for-byte distinct; an unguarded
/// transition sharing `(from, event)` with anything else always
/// overlaps, since an absent guard matches unconditionally.
pub fn nondeterministic_transitions(
    sm: &StateMachineSemantics,
    prefix: &[String],
    out: &mut Vec<Diagnostic>,
) {
    for (idx, transition) in sm.transitions.iter().enumerate() {
        let conflicts_with_earlier = sm.transitions[..idx].iter().any(|earlier| {
            earlier.from == transition.from
                && earlier.event == transition.event
                && may_overlap(&earlier.guard, &transition.guard)
        });
        if conflicts_with_earlier {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::NondeterministicTransition,
                    format!(
                        "transition from `{}` on {:?} may be ambiguous with an earlier transition",
                        transition.from, transition.event
                    ),
                )
                .with_path(prefix.iter().cloned().chain([
                    "transitions".to_string(),
                    idx.to_string(),
                ])),
            );
        }
    }
}

fn may_overlap(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}
