//! The semantic validator: cross-reference, reachability, and
//! determinism checks over an already-decoded document, run in one pass
//! that accumulates every diagnostic it finds rather than stopping at
//! the first one (unlike the decoder, which is fail-fast).

mod constraints;
mod determinism;
mod handlers;
mod options;
mod reachability;
mod report;

pub use options::ValidationOptions;
pub use report::ValidationReport;

use crate::diagnostics::Diagnostic;
use crate::document::{structural_diagnostics, BsifDocument, Semantics, SemanticsRef};

/// Validate a decoded document, returning every diagnostic found.
///
/// The structural invariants are always re-checked,
/// since the validator must be callable standalone on a document that
/// arrived from anywhere, not only on one fresh out of [`crate::decode`].
/// When `options.check_semantics` is `false`, nothing beyond that runs.
pub fn validate(doc: &BsifDocument, options: ValidationOptions) -> ValidationReport {
    let mut diagnostics = structural_diagnostics(doc);

    if options.check_semantics {
        let is_hybrid = matches!(doc.semantics, Semantics::Hybrid { .. });
        for (index, member) in doc.semantics.members().into_iter().enumerate() {
            let prefix: Vec<String> = if is_hybrid {
                vec!["semantics".to_string(), index.to_string()]
            } else {
                vec!["semantics".to_string()]
            };
            check_member(member, &prefix, &mut diagnostics);
        }
    }

    ValidationReport::new(diagnostics)
}

fn check_member(member: SemanticsRef<'_>, prefix: &[String], out: &mut Vec<Diagnostic>) {
    match member {
        SemanticsRef::StateMachine(sm) => {
            reachability::unreachable_states(sm, prefix, out);
            determinism::nondeterministic_transitions(sm, prefix, out);
        }
        SemanticsRef::Constraints(constraints) => constraints::check_target(constraints, prefix, out),
        SemanticsRef::Events(events) => handlers::check_handlers(events, prefix, out),
        SemanticsRef::Temporal(_) | SemanticsRef::Interaction(_) => {
            // LTL variable references and interaction endpoints are
            // structural checks with no cross-document context, and
            // already ran above in `structural_diagnostics`.
        }
    }
}
