//! The state-machine executor: a pure, immutable step function over a
//! decoded [`crate::document::StateMachineSemantics`]. Guards are
//! opaque labels here — not evaluated; a richer
//! guard-evaluating executor is an external collaborator.

mod instance;

pub use instance::StateMachineInstance;
