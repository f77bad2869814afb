//! The typed BSIF document model: [`Metadata`] plus one [`Semantics`]
//! variant, and the `references` section the resolver composes over.

mod constraints;
mod events;
mod interaction;
pub(crate) mod invariants;
mod ltl;
mod metadata;
mod references;
mod semantics;
mod state_machine;
mod temporal;
mod value;

pub use constraints::{Constraint, ConstraintTarget, ConstraintsSemantics};
pub use events::{EventDeclaration, EventsSemantics, Handler};
pub use interaction::{InteractionSemantics, Message};
pub use invariants::structural_diagnostics;
pub use ltl::LtlFormula;
pub use metadata::Metadata;
pub use references::{ReferenceSpec, References};
pub use semantics::{NonHybridSemantics, Semantics, SemanticsKind, SemanticsRef};
pub use state_machine::{State, StateMachineSemantics, Transition};
pub use temporal::{Property, TemporalSemantics};
pub use value::{LiteralValue, VariableType};

use serde::{Deserialize, Serialize};

/// A decoded BSIF document.
///
/// Ownership is a tree: the document owns its semantics exclusively,
/// semantics own their children, and there are no back-references. That
/// makes [`Clone`] on a whole document a plain deep copy with no
/// aliasing to reason about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BsifDocument {
    pub metadata: Metadata,
    pub semantics: Semantics,
    #[serde(default, skip_serializing_if = "indexmap::IndexMap::is_empty")]
    pub references: References,
}
