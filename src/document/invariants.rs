//! Structural invariants that can be checked without cross-referencing
//! other documents. The decoder runs these once, fail-fast, right after
//! building a document; the validator re-runs the same function so it
//! stays callable standalone on a document that arrived from anywhere.
//! Validation is pure and must accumulate all diagnostics, so this
//! function never stops at the first failure; only the decoder's caller
//! decides whether to stop at the first one.

use std::collections::{HashMap, HashSet};

use super::semantics::SemanticsRef;
use super::BsifDocument;
use crate::diagnostics::{Diagnostic, DiagnosticCode};

pub fn structural_diagnostics(doc: &BsifDocument) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if !doc.metadata.bsif_version_is_valid() {
        out.push(
            Diagnostic::new(
                DiagnosticCode::InvalidFieldValue,
                format!(
                    "bsif_version `{}` does not match ^\\d+\\.\\d+\\.\\d+$",
                    doc.metadata.bsif_version
                ),
            )
            .with_path(["metadata", "bsif_version"]),
        );
    }

    if !doc.metadata.name_is_valid() {
        out.push(
            Diagnostic::new(DiagnosticCode::InvalidFieldValue, "metadata `name` must be non-empty")
                .with_path(["metadata", "name"]),
        );
    }

    for (index, member) in doc.semantics.members().into_iter().enumerate() {
        let prefix: Vec<String> = if matches!(doc.semantics, super::Semantics::Hybrid { .. }) {
            vec!["semantics".to_string(), index.to_string()]
        } else {
            vec!["semantics".to_string()]
        };
        check_member(member, &prefix, &mut out);
    }

    out
}

fn check_member(member: SemanticsRef<'_>, prefix: &[String], out: &mut Vec<Diagnostic>) {
    match member {
        SemanticsRef::StateMachine(sm) => check_state_machine(sm, prefix, out),
        SemanticsRef::Temporal(t) => check_temporal(t, prefix, out),
        SemanticsRef::Interaction(i) => check_interaction(i, prefix, out),
        SemanticsRef::Constraints(_) | SemanticsRef::Events(_) => {
            // Constraint-target shape and handler/event cross-reference
            // are semantic, validator-only checks.
        }
    }
}

fn path(prefix: &[String], rest: &[&str]) -> Vec<String> {
    prefix
        .iter()
        .cloned()
        .chain(rest.iter().map(|s| s.to_string()))
        .collect()
}

fn check_state_machine(
    sm: &super::StateMachineSemantics,
    prefix: &[String],
    out: &mut Vec<Diagnostic>,
) {
    let mut seen = HashSet::new();
    for (idx, state) in sm.states.iter().enumerate() {
        if !seen.insert(state.name.clone()) {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::DuplicateName,
                    format!("duplicate state name `{}`", state.name),
                )
                .with_path(path(prefix, &["states", &idx.to_string()])),
            );
        }
    }

    if !sm.has_state(&sm.initial) {
        out.push(
            Diagnostic::new(
                DiagnosticCode::UnknownState,
                format!("initial state `{}` is not declared", sm.initial),
            )
            .with_path(path(prefix, &["initial"])),
        );
    }

    for (idx, final_state) in sm.final_states.iter().enumerate() {
        if !sm.has_state(final_state) {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::UnknownState,
                    format!("final state `{final_state}` is not declared"),
                )
                .with_path(path(prefix, &["final", &idx.to_string()])),
            );
        }
    }

    for (idx, transition) in sm.transitions.iter().enumerate() {
        if !sm.has_state(&transition.from) {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::UnknownState,
                    format!("transition `from` names undeclared state `{}`", transition.from),
                )
                .with_path(path(prefix, &["transitions", &idx.to_string(), "from"])),
            );
        }
        if !sm.has_state(&transition.to) {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::UnknownState,
                    format!("transition `to` names undeclared state `{}`", transition.to),
                )
                .with_path(path(prefix, &["transitions", &idx.to_string(), "to"])),
            );
        }
    }

    check_hierarchy_is_forest(sm, prefix, out);
}

/// `parent` edges must form a forest: no state is its own ancestor.
fn check_hierarchy_is_forest(
    sm: &super::StateMachineSemantics,
    prefix: &[String],
    out: &mut Vec<Diagnostic>,
) {
    let parent_of: HashMap<&str, &str> = sm
        .states
        .iter()
        .filter_map(|s| s.parent.as_ref().map(|p| (s.name.as_str(), p.as_str())))
        .collect();

    for (idx, state) in sm.states.iter().enumerate() {
        let mut seen = HashSet::new();
        let mut cursor = state.name.as_str();
        seen.insert(cursor);
        while let Some(parent) = parent_of.get(cursor) {
            if !seen.insert(*parent) {
                out.push(
                    Diagnostic::new(
                        DiagnosticCode::InvalidFieldValue,
                        format!("state hierarchy cycle involving `{}`", state.name),
                    )
                    .with_path(path(prefix, &["states", &idx.to_string(), "parent"])),
                );
                break;
            }
            cursor = parent;
        }
    }
}

fn check_temporal(temporal: &super::TemporalSemantics, prefix: &[String], out: &mut Vec<Diagnostic>) {
    for (pidx, property) in temporal.properties.iter().enumerate() {
        let mut refs = Vec::new();
        property.formula.variable_refs(&mut refs);
        for name in refs {
            if !temporal.has_variable(&name) {
                out.push(
                    Diagnostic::new(
                        DiagnosticCode::UnknownVariable,
                        format!("LTL formula references undeclared variable `{name}`"),
                    )
                    .with_path(path(
                        prefix,
                        &["properties", &pidx.to_string(), "formula"],
                    )),
                );
            }
        }

        let mut mismatches = Vec::new();
        property.formula.type_mismatches(&temporal.variables, &mut mismatches);
        for (name, value) in mismatches {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::InvalidFieldValue,
                    format!(
                        "literal {value:?} is not compatible with `{name}`'s declared type in property `{}`",
                        property.name
                    ),
                )
                .with_path(path(
                    prefix,
                    &["properties", &pidx.to_string(), "formula"],
                )),
            );
        }
    }
}

fn check_interaction(
    interaction: &super::InteractionSemantics,
    prefix: &[String],
    out: &mut Vec<Diagnostic>,
) {
    let mut seen = HashSet::new();
    for (idx, participant) in interaction.participants.iter().enumerate() {
        if !seen.insert(participant.clone()) {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::DuplicateName,
                    format!("duplicate participant name `{participant}`"),
                )
                .with_path(path(prefix, &["participants", &idx.to_string()])),
            );
        }
    }

    for (idx, message) in interaction.messages.iter().enumerate() {
        if !interaction.has_participant(&message.from) {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::UnknownParticipant,
                    format!("message `from` names undeclared participant `{}`", message.from),
                )
                .with_path(path(prefix, &["messages", &idx.to_string(), "from"])),
            );
        }
        if !interaction.has_participant(&message.to) {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::UnknownParticipant,
                    format!("message `to` names undeclared participant `{}`", message.to),
                )
                .with_path(path(prefix, &["messages", &idx.to_string(), "to"])),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Metadata, Semantics, State, StateMachineSemantics, Transition};

    fn doc(sm: StateMachineSemantics) -> BsifDocument {
        BsifDocument {
            metadata: Metadata {
                bsif_version: "1.0.0".to_string(),
                name: "test".to_string(),
                version: None,
                description: None,
                authors: Vec::new(),
                tags: Vec::new(),
            },
            semantics: Semantics::StateMachine(sm),
            references: Default::default(),
        }
    }

    #[test]
    fn unknown_initial_state_is_reported() {
        let sm = StateMachineSemantics {
            states: vec![State {
                name: "a".into(),
                parent: None,
                parallel: false,
                entry: None,
                exit: None,
            }],
            transitions: vec![],
            initial: "nonexistent".into(),
            final_states: vec![],
        };
        let diags = structural_diagnostics(&doc(sm));
        assert!(diags.iter().any(|d| d.code == DiagnosticCode::UnknownState
            && d.pointer() == "/semantics/initial"));
    }

    #[test]
    fn transition_endpoint_cycle_free_hierarchy_is_accepted() {
        let sm = StateMachineSemantics {
            states: vec![
                State { name: "a".into(), parent: None, parallel: false, entry: None, exit: None },
                State { name: "b".into(), parent: Some("a".into()), parallel: false, entry: None, exit: None },
            ],
            transitions: vec![Transition {
                from: "a".into(),
                to: "b".into(),
                event: Some("go".into()),
                guard: None,
                action: None,
            }],
            initial: "a".into(),
            final_states: vec!["b".into()],
        };
        assert!(structural_diagnostics(&doc(sm)).is_empty());
    }

    #[test]
    fn hierarchy_cycle_is_reported() {
        let sm = StateMachineSemantics {
            states: vec![
                State { name: "a".into(), parent: Some("b".into()), parallel: false, entry: None, exit: None },
                State { name: "b".into(), parent: Some("a".into()), parallel: false, entry: None, exit: None },
            ],
            transitions: vec![],
            initial: "a".into(),
            final_states: vec![],
        };
        let diags = structural_diagnostics(&doc(sm));
        assert!(diags.iter().any(|d| d.message.contains("cycle")));
    }

    #[test]
    fn ltl_literal_type_mismatch_against_declared_variable_is_reported() {
        use crate::document::{LiteralValue, LtlFormula, Property, TemporalSemantics, VariableType};
        use indexmap::IndexMap;

        let mut variables = IndexMap::new();
        variables.insert("x".into(), VariableType::Bool);
        let temporal = TemporalSemantics {
            logic: "ltl".to_string(),
            variables,
            properties: vec![Property {
                name: "p".to_string(),
                formula: LtlFormula::Iff {
                    left: Box::new(LtlFormula::Variable { name: "x".into() }),
                    right: Box::new(LtlFormula::Literal { value: LiteralValue::String("red".to_string()) }),
                },
            }],
        };
        let mut doc = doc(StateMachineSemantics {
            states: vec![],
            transitions: vec![],
            initial: "a".into(),
            final_states: vec![],
        });
        doc.semantics = Semantics::Temporal(temporal);
        let diags = structural_diagnostics(&doc);
        assert!(diags.iter().any(|d| d.code == DiagnosticCode::InvalidFieldValue
            && d.message.contains("not compatible")));
    }

    #[test]
    fn empty_name_is_reported() {
        let sm = StateMachineSemantics {
            states: vec![State { name: "a".into(), parent: None, parallel: false, entry: None, exit: None }],
            transitions: vec![],
            initial: "a".into(),
            final_states: vec![],
        };
        let mut document = doc(sm);
        document.metadata.name = String::new();
        let diags = structural_diagnostics(&document);
        assert!(diags.iter().any(|d| d.code == DiagnosticCode::InvalidFieldValue
            && d.pointer() == "/metadata/name"));
    }

    #[test]
    fn ltl_literal_type_match_is_silent() {
        use crate::document::{LiteralValue, LtlFormula, Property, TemporalSemantics, VariableType};
        use indexmap::IndexMap;

        let mut variables = IndexMap::new();
        variables.insert("x".into(), VariableType::Bool);
        let temporal = TemporalSemantics {
            logic: "ltl".to_string(),
            variables,
            properties: vec![Property {
                name: "p".to_string(),
                formula: LtlFormula::Iff {
                    left: Box::new(LtlFormula::Variable { name: "x".into() }),
                    right: Box::new(LtlFormula::Literal { value: LiteralValue::Bool(true) }),
                },
            }],
        };
        let mut doc = doc(StateMachineSemantics {
            states: vec![],
            transitions: vec![],
            initial: "a".into(),
            final_states: vec![],
        });
        doc.semantics = Semantics::Temporal(temporal);
        assert!(structural_diagnostics(&doc).is_empty());
    }
}
