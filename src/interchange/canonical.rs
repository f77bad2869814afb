//! Canonical-form JSON rendering: tab indent, arrays of
//! declared objects in insertion (struct declaration) order, free-form
//! maps in lexicographic key order.
//!
//! `serde_json::Value`'s `Map` enforces one global ordering policy for
//! every object, so it cannot express "declared fields keep their
//! order, but this particular map sorts" at the same time. This module
//! instead builds its own small ordered tree and walks the typed
//! document directly, choosing field order per node rather than relying
//! on a single serializer pass.

use std::borrow::Cow;

use crate::document::{
    BsifDocument, Constraint, ConstraintTarget, ConstraintsSemantics, EventDeclaration,
    EventsSemantics, Handler, InteractionSemantics, LiteralValue, LtlFormula, Message, Metadata,
    NonHybridSemantics, Property, ReferenceSpec, References, Semantics, State,
    StateMachineSemantics, TemporalSemantics, Transition, VariableType,
};

/// A field key: `&'static str` for a typed struct's declared fields,
/// owned for a free-form map's caller-supplied key. [`Canon::Object`]
/// holds one `Vec` of these rather than leaking owned keys to make
/// them `'static`, so rendering a document never grows process memory.
type Field = (Cow<'static, str>, Canon);

enum Canon {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Canon>),
    /// Fields in the order given: declaration order for a typed struct,
    /// already-sorted order for a free-form map.
    Object(Vec<Field>),
}

/// A declared field: the key is a fixed `&'static str` borrowed for the
/// lifetime of the program, not owned per call.
fn field(key: &'static str, value: Canon) -> Field {
    (Cow::Borrowed(key), value)
}

/// A free-form map entry: the key is owned because it borrows from the
/// document being rendered, not from a `'static` source.
fn owned_field(key: &str, value: Canon) -> Field {
    (Cow::Owned(key.to_string()), value)
}

/// Render `doc` as canonical-form JSON: tab-indented, with field
/// ordering as described above.
pub fn to_canonical_json(doc: &BsifDocument) -> String {
    let mut out = String::new();
    render(&canon_document(doc), 0, &mut out);
    out
}

fn render(value: &Canon, depth: usize, out: &mut String) {
    match value {
        Canon::Null => out.push_str("null"),
        Canon::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Canon::Int(i) => out.push_str(&i.to_string()),
        Canon::Float(f) => out.push_str(&f.to_string()),
        Canon::String(s) => out.push_str(&serde_json::to_string(s).unwrap_or_default()),
        Canon::Array(items) => render_seq(items.iter(), '[', ']', depth, out, |item, depth, out| {
            render(item, depth, out)
        }),
        Canon::Object(fields) => {
            render_seq(fields.iter(), '{', '}', depth, out, |(key, value), depth, out| {
                out.push_str(&serde_json::to_string(key.as_ref()).unwrap_or_default());
                out.push_str(": ");
                render(value, depth, out);
            })
        }
    }
}

fn render_seq<'a, T>(
    items: impl Iterator<Item = T> + ExactSizeIterator,
    open: char,
    close: char,
    depth: usize,
    out: &mut String,
    mut item: impl FnMut(T, usize, &mut String),
) {
    if items.len() == 0 {
        out.push(open);
        out.push(close);
        return;
    }
    out.push(open);
    out.push('\n');
    let inner_depth = depth + 1;
    let len = items.len();
    for (idx, value) in items.enumerate() {
        out.push_str(&"\t".repeat(inner_depth));
        item(value, inner_depth, out);
        if idx + 1 < len {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&"\t".repeat(depth));
    out.push(close);
}

fn sorted_map<'a, T>(map: &'a indexmap::IndexMap<crate::base::Name, T>) -> Vec<(&'a str, &'a T)> {
    let mut entries: Vec<(&str, &T)> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn canon_document(doc: &BsifDocument) -> Canon {
    let mut fields =
        vec![field("metadata", canon_metadata(&doc.metadata)), field("semantics", canon_semantics(&doc.semantics))];
    if !doc.references.is_empty() {
        fields.push(field("references", canon_references(&doc.references)));
    }
    Canon::Object(fields)
}

fn canon_metadata(metadata: &Metadata) -> Canon {
    let mut fields = vec![
        field("bsif_version", Canon::String(metadata.bsif_version.clone())),
        field("name", Canon::String(metadata.name.clone())),
    ];
    if let Some(version) = &metadata.version {
        fields.push(field("version", Canon::String(version.clone())));
    }
    if let Some(description) = &metadata.description {
        fields.push(field("description", Canon::String(description.clone())));
    }
    if !metadata.authors.is_empty() {
        fields.push(field("authors", Canon::Array(metadata.authors.iter().cloned().map(Canon::String).collect())));
    }
    if !metadata.tags.is_empty() {
        fields.push(field("tags", Canon::Array(metadata.tags.iter().cloned().map(Canon::String).collect())));
    }
    Canon::Object(fields)
}

fn canon_references(references: &References) -> Canon {
    Canon::Object(
        sorted_map(references)
            .into_iter()
            .map(|(name, spec)| owned_field(name, canon_reference_spec(spec)))
            .collect(),
    )
}

fn canon_reference_spec(spec: &ReferenceSpec) -> Canon {
    let mut fields = vec![field("path", Canon::String(spec.path.clone()))];
    if let Some(version) = &spec.version {
        fields.push(field("version", Canon::String(version.clone())));
    }
    Canon::Object(fields)
}

fn canon_semantics(semantics: &Semantics) -> Canon {
    match semantics {
        Semantics::StateMachine(sm) => with_type("state-machine", canon_state_machine_fields(sm)),
        Semantics::Temporal(t) => with_type("temporal", canon_temporal_fields(t)),
        Semantics::Constraints(c) => with_type("constraints", canon_constraints_fields(c)),
        Semantics::Events(e) => with_type("events", canon_events_fields(e)),
        Semantics::Interaction(i) => with_type("interaction", canon_interaction_fields(i)),
        Semantics::Hybrid { members } => with_type(
            "hybrid",
            vec![field("members", Canon::Array(members.iter().map(canon_non_hybrid).collect()))],
        ),
    }
}

fn canon_non_hybrid(member: &NonHybridSemantics) -> Canon {
    match member {
        NonHybridSemantics::StateMachine(sm) => with_type("state-machine", canon_state_machine_fields(sm)),
        NonHybridSemantics::Temporal(t) => with_type("temporal", canon_temporal_fields(t)),
        NonHybridSemantics::Constraints(c) => with_type("constraints", canon_constraints_fields(c)),
        NonHybridSemantics::Events(e) => with_type("events", canon_events_fields(e)),
        NonHybridSemantics::Interaction(i) => with_type("interaction", canon_interaction_fields(i)),
    }
}

fn with_type(kind: &'static str, mut fields: Vec<Field>) -> Canon {
    fields.insert(0, field("type", Canon::String(kind.to_string())));
    Canon::Object(fields)
}

fn canon_state_machine_fields(sm: &StateMachineSemantics) -> Vec<Field> {
    let mut fields = vec![
        field("states", Canon::Array(sm.states.iter().map(canon_state).collect())),
        field("transitions", Canon::Array(sm.transitions.iter().map(canon_transition).collect())),
        field("initial", Canon::String(sm.initial.to_string())),
    ];
    if !sm.final_states.is_empty() {
        fields.push(field(
            "final",
            Canon::Array(sm.final_states.iter().map(|s| Canon::String(s.to_string())).collect()),
        ));
    }
    fields
}

fn canon_state(state: &State) -> Canon {
    let mut fields = vec![field("name", Canon::String(state.name.to_string()))];
    if let Some(parent) = &state.parent {
        fields.push(field("parent", Canon::String(parent.to_string())));
    }
    if state.parallel {
        fields.push(field("parallel", Canon::Bool(true)));
    }
    if let Some(entry) = &state.entry {
        fields.push(field("entry", Canon::String(entry.clone())));
    }
    if let Some(exit) = &state.exit {
        fields.push(field("exit", Canon::String(exit.clone())));
    }
    Canon::Object(fields)
}

fn canon_transition(transition: &Transition) -> Canon {
    let mut fields = vec![
        field("from", Canon::String(transition.from.to_string())),
        field("to", Canon::String(transition.to.to_string())),
    ];
    if let Some(event) = &transition.event {
        fields.push(field("event", Canon::String(event.to_string())));
    }
    if let Some(guard) = &transition.guard {
        fields.push(field("guard", Canon::String(guard.clone())));
    }
    if let Some(action) = &transition.action {
        fields.push(field("action", Canon::String(action.clone())));
    }
    Canon::Object(fields)
}

fn canon_temporal_fields(temporal: &TemporalSemantics) -> Vec<Field> {
    vec![
        field("logic", Canon::String(temporal.logic.clone())),
        field(
            "variables",
            Canon::Object(
                sorted_map(&temporal.variables)
                    .into_iter()
                    .map(|(name, ty)| owned_field(name, canon_variable_type(*ty)))
                    .collect(),
            ),
        ),
        field("properties", Canon::Array(temporal.properties.iter().map(canon_property).collect())),
    ]
}

fn canon_variable_type(ty: VariableType) -> Canon {
    Canon::String(
        match ty {
            VariableType::Bool => "bool",
            VariableType::Int => "int",
            VariableType::Float => "float",
            VariableType::String => "string",
        }
        .to_string(),
    )
}

fn canon_property(property: &Property) -> Canon {
    Canon::Object(vec![
        field("name", Canon::String(property.name.clone())),
        field("formula", canon_ltl(&property.formula)),
    ])
}

fn canon_ltl(formula: &LtlFormula) -> Canon {
    match formula {
        LtlFormula::Variable { name } => {
            Canon::Object(vec![field("op", Canon::String("variable".to_string())), field("name", Canon::String(name.to_string()))])
        }
        LtlFormula::Literal { value } => {
            Canon::Object(vec![field("op", Canon::String("literal".to_string())), field("value", canon_literal(value))])
        }
        LtlFormula::Not { operand } => unary("not", operand),
        LtlFormula::Next { operand } => unary("next", operand),
        LtlFormula::Globally { operand } => unary("globally", operand),
        LtlFormula::Finally { operand } => unary("finally", operand),
        LtlFormula::And { left, right } => binary("and", left, right),
        LtlFormula::Or { left, right } => binary("or", left, right),
        LtlFormula::Implies { left, right } => binary("implies", left, right),
        LtlFormula::Iff { left, right } => binary("iff", left, right),
        LtlFormula::Until { left, right } => binary("until", left, right),
        LtlFormula::Release { left, right } => binary("release", left, right),
    }
}

fn unary(op: &'static str, operand: &LtlFormula) -> Canon {
    Canon::Object(vec![field("op", Canon::String(op.to_string())), field("operand", canon_ltl(operand))])
}

fn binary(op: &'static str, left: &LtlFormula, right: &LtlFormula) -> Canon {
    Canon::Object(vec![
        field("op", Canon::String(op.to_string())),
        field("left", canon_ltl(left)),
        field("right", canon_ltl(right)),
    ])
}

fn canon_literal(value: &LiteralValue) -> Canon {
    match value {
        LiteralValue::Bool(b) => Canon::Bool(*b),
        LiteralValue::Int(i) => Canon::Int(*i),
        LiteralValue::Float(f) => Canon::Float(*f),
        LiteralValue::String(s) => Canon::String(s.clone()),
    }
}

fn canon_constraints_fields(constraints: &ConstraintsSemantics) -> Vec<Field> {
    let mut fields = vec![field("target", canon_constraint_target(&constraints.target))];
    if !constraints.preconditions.is_empty() {
        fields.push(field(
            "preconditions",
            Canon::Array(constraints.preconditions.iter().map(canon_constraint).collect()),
        ));
    }
    if !constraints.postconditions.is_empty() {
        fields.push(field(
            "postconditions",
            Canon::Array(constraints.postconditions.iter().map(canon_constraint).collect()),
        ));
    }
    if !constraints.invariants.is_empty() {
        fields.push(field(
            "invariants",
            Canon::Array(constraints.invariants.iter().map(canon_constraint).collect()),
        ));
    }
    fields
}

fn canon_constraint_target(target: &ConstraintTarget) -> Canon {
    let mut fields = Vec::new();
    if let Some(function) = &target.function {
        fields.push(field("function", Canon::String(function.clone())));
    }
    if let Some(method) = &target.method {
        fields.push(field("method", Canon::String(method.clone())));
    }
    if let Some(class) = &target.class {
        fields.push(field("class", Canon::String(class.clone())));
    }
    if let Some(module) = &target.module {
        fields.push(field("module", Canon::String(module.clone())));
    }
    Canon::Object(fields)
}

fn canon_constraint(constraint: &Constraint) -> Canon {
    Canon::Object(vec![
        field("description", Canon::String(constraint.description.clone())),
        field("expression", Canon::String(constraint.expression.clone())),
    ])
}

fn canon_events_fields(events: &EventsSemantics) -> Vec<Field> {
    let mut fields = vec![field(
        "events",
        Canon::Object(
            sorted_map(&events.events)
                .into_iter()
                .map(|(name, decl)| owned_field(name, canon_event_declaration(decl)))
                .collect(),
        ),
    )];
    if !events.handlers.is_empty() {
        fields.push(field("handlers", Canon::Array(events.handlers.iter().map(canon_handler).collect())));
    }
    if let Some(types) = &events.types {
        let mut entries: Vec<(&str, &serde_json::Value)> = types.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        fields.push(field(
            "types",
            Canon::Object(entries.into_iter().map(|(k, v)| owned_field(k, canon_json_value(v))).collect()),
        ));
    }
    fields
}

fn canon_event_declaration(decl: &EventDeclaration) -> Canon {
    let mut fields = Vec::new();
    if let Some(payload_type) = &decl.payload_type {
        fields.push(field("payload_type", Canon::String(payload_type.clone())));
    }
    Canon::Object(fields)
}

fn canon_handler(handler: &Handler) -> Canon {
    let mut fields = vec![
        field("event", Canon::String(handler.event.to_string())),
        field("action", Canon::String(handler.action.clone())),
    ];
    if let Some(guard) = &handler.guard {
        fields.push(field("guard", Canon::String(guard.clone())));
    }
    Canon::Object(fields)
}

fn canon_interaction_fields(interaction: &InteractionSemantics) -> Vec<Field> {
    vec![
        field(
            "participants",
            Canon::Array(interaction.participants.iter().map(|p| Canon::String(p.to_string())).collect()),
        ),
        field("messages", Canon::Array(interaction.messages.iter().map(canon_message).collect())),
    ]
}

fn canon_message(message: &Message) -> Canon {
    let mut fields = vec![
        field("from", Canon::String(message.from.to_string())),
        field("to", Canon::String(message.to.to_string())),
        field("message", Canon::String(message.message.clone())),
    ];
    if let Some(condition) = &message.condition {
        fields.push(field("condition", Canon::String(condition.clone())));
    }
    Canon::Object(fields)
}

fn canon_json_value(value: &serde_json::Value) -> Canon {
    match value {
        serde_json::Value::Null => Canon::Null,
        serde_json::Value::Bool(b) => Canon::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Canon::Int(i)
            } else {
                Canon::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Canon::String(s.clone()),
        serde_json::Value::Array(items) => Canon::Array(items.iter().map(canon_json_value).collect()),
        serde_json::Value::Object(map) => {
            let mut entries: Vec<(&str, &serde_json::Value)> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Canon::Object(entries.into_iter().map(|(k, v)| owned_field(k, canon_json_value(v))).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Metadata, State, Transition};
    use indexmap::IndexMap;

    fn doc() -> BsifDocument {
        BsifDocument {
            metadata: Metadata {
                bsif_version: "1.0.0".to_string(),
                name: "light".to_string(),
                version: None,
                description: None,
                authors: Vec::new(),
                tags: Vec::new(),
            },
            semantics: Semantics::StateMachine(StateMachineSemantics {
                states: vec![
                    State { name: "red".into(), parent: None, parallel: false, entry: None, exit: None },
                    State { name: "green".into(), parent: None, parallel: false, entry: None, exit: None },
                ],
                transitions: vec![Transition {
                    from: "red".into(),
                    to: "green".into(),
                    event: Some("go".into()),
                    guard: None,
                    action: None,
                }],
                initial: "red".into(),
                final_states: vec![],
            }),
            references: IndexMap::new(),
        }
    }

    #[test]
    fn uses_tab_indentation() {
        let rendered = to_canonical_json(&doc());
        assert!(rendered.contains("\n\t\"metadata\""));
    }

    #[test]
    fn preserves_declared_state_order() {
        let rendered = to_canonical_json(&doc());
        let red_idx = rendered.find("\"red\"").unwrap();
        let green_idx = rendered.find("\"green\"").unwrap();
        assert!(red_idx < green_idx);
    }

    #[test]
    fn sorts_free_form_reference_map() {
        let mut references = References::new();
        references.insert("zeta".into(), ReferenceSpec { path: "z.json".to_string(), version: None });
        references.insert("alpha".into(), ReferenceSpec { path: "a.json".to_string(), version: None });
        let mut d = doc();
        d.references = references;
        let rendered = to_canonical_json(&d);
        let alpha_idx = rendered.find("\"alpha\"").unwrap();
        let zeta_idx = rendered.find("\"zeta\"").unwrap();
        assert!(alpha_idx < zeta_idx);
    }

    #[test]
    fn round_trips_through_serde_json() {
        let rendered = to_canonical_json(&doc());
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let original: BsifDocument = serde_json::from_value(value).unwrap();
        assert_eq!(original, doc());
    }

    #[test]
    fn rendering_a_free_form_map_does_not_leak() {
        // Regression test for the Box::leak-per-key approach this module
        // used to take: rendering many documents with distinct free-form
        // keys must not grow process memory without bound. This doesn't
        // measure memory directly, but it exercises the owned-key path
        // many times over, which would have produced that many leaks.
        for i in 0..1000 {
            let mut references = References::new();
            references.insert(format!("ref-{i}").into(), ReferenceSpec { path: "x.json".to_string(), version: None });
            let mut d = doc();
            d.references = references;
            let rendered = to_canonical_json(&d);
            assert!(rendered.contains(&format!("\"ref-{i}\"")));
        }
    }
}
