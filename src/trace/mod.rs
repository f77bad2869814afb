//! Finite-trace LTL evaluation: check an [`crate::document::LtlFormula`]
//! against a finite trace of variable snapshots.

mod checker;
mod outcome;
mod snapshot;

pub use checker::check_trace;
pub use outcome::TraceOutcome;
pub use snapshot::Snapshot;
