use serde::{Deserialize, Serialize};

use super::constraints::ConstraintsSemantics;
use super::events::EventsSemantics;
use super::interaction::InteractionSemantics;
use super::state_machine::StateMachineSemantics;
use super::temporal::TemporalSemantics;

/// The six semantic variants a BSIF document's `semantics` may take.
///
/// `Hybrid` holds [`NonHybridSemantics`] rather than `Semantics` itself,
/// so hybrid composition cannot nest: that is a fact the type system
/// enforces, not a runtime check a future maintainer can forget to call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Semantics {
    #[serde(rename = "state-machine")]
    StateMachine(StateMachineSemantics),
    #[serde(rename = "temporal")]
    Temporal(TemporalSemantics),
    #[serde(rename = "constraints")]
    Constraints(ConstraintsSemantics),
    #[serde(rename = "events")]
    Events(EventsSemantics),
    #[serde(rename = "interaction")]
    Interaction(InteractionSemantics),
    #[serde(rename = "hybrid")]
    Hybrid { members: Vec<NonHybridSemantics> },
}

/// One of the five non-hybrid semantic variants, usable as a member of a
/// [`Semantics::Hybrid`] composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NonHybridSemantics {
    #[serde(rename = "state-machine")]
    StateMachine(StateMachineSemantics),
    #[serde(rename = "temporal")]
    Temporal(TemporalSemantics),
    #[serde(rename = "constraints")]
    Constraints(ConstraintsSemantics),
    #[serde(rename = "events")]
    Events(EventsSemantics),
    #[serde(rename = "interaction")]
    Interaction(InteractionSemantics),
}

impl NonHybridSemantics {
    pub fn as_semantics(&self) -> SemanticsRef<'_> {
        match self {
            NonHybridSemantics::StateMachine(s) => SemanticsRef::StateMachine(s),
            NonHybridSemantics::Temporal(s) => SemanticsRef::Temporal(s),
            NonHybridSemantics::Constraints(s) => SemanticsRef::Constraints(s),
            NonHybridSemantics::Events(s) => SemanticsRef::Events(s),
            NonHybridSemantics::Interaction(s) => SemanticsRef::Interaction(s),
        }
    }
}

/// A borrowed view over any non-hybrid variant, letting the validator
/// walk a top-level [`Semantics`] and a nested [`NonHybridSemantics`]
/// with the same match arms.
#[derive(Debug, Clone, Copy)]
pub enum SemanticsRef<'a> {
    StateMachine(&'a StateMachineSemantics),
    Temporal(&'a TemporalSemantics),
    Constraints(&'a ConstraintsSemantics),
    Events(&'a EventsSemantics),
    Interaction(&'a InteractionSemantics),
}

impl Semantics {
    /// The six-way discriminator string, used by the formal-methods
    /// projection boundary to round-trip `semantics.type` without
    /// caring about the payload.
    pub fn kind(&self) -> SemanticsKind {
        match self {
            Semantics::StateMachine(_) => SemanticsKind::StateMachine,
            Semantics::Temporal(_) => SemanticsKind::Temporal,
            Semantics::Constraints(_) => SemanticsKind::Constraints,
            Semantics::Events(_) => SemanticsKind::Events,
            Semantics::Interaction(_) => SemanticsKind::Interaction,
            Semantics::Hybrid { .. } => SemanticsKind::Hybrid,
        }
    }

    /// Iterate the top-level members to validate: a non-hybrid document
    /// yields itself once; a hybrid document yields each child in
    /// declaration order.
    pub fn members(&self) -> Vec<SemanticsRef<'_>> {
        match self {
            Semantics::StateMachine(s) => vec![SemanticsRef::StateMachine(s)],
            Semantics::Temporal(s) => vec![SemanticsRef::Temporal(s)],
            Semantics::Constraints(s) => vec![SemanticsRef::Constraints(s)],
            Semantics::Events(s) => vec![SemanticsRef::Events(s)],
            Semantics::Interaction(s) => vec![SemanticsRef::Interaction(s)],
            Semantics::Hybrid { members } => members.iter().map(NonHybridSemantics::as_semantics).collect(),
        }
    }
}

/// The `semantics.type` discriminator, standalone from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticsKind {
    StateMachine,
    Temporal,
    Constraints,
    Events,
    Interaction,
    Hybrid,
}

impl SemanticsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticsKind::StateMachine => "state-machine",
            SemanticsKind::Temporal => "temporal",
            SemanticsKind::Constraints => "constraints",
            SemanticsKind::Events => "events",
            SemanticsKind::Interaction => "interaction",
            SemanticsKind::Hybrid => "hybrid",
        }
    }
}
