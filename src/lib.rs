//! # bsif-core
//!
//! Schema, semantic validator, reference resolver, and runtime
//! semantics for BSIF (Behavioral Specification Interchange Format)
//! documents.
//!
//! ## Module structure (dependency order)
//!
//! ```text
//! exec, trace    -> runtime semantics over a decoded document
//!   ^
//! validate       -> semantic diagnostics over a decoded document
//!   ^
//! resolve        -> multi-file reference composition
//!   ^
//! decode         -> raw bytes -> typed document
//!   ^
//! document       -> the typed document model
//!   ^
//! diagnostics    -> the shared diagnostic vocabulary
//!   ^
//! base           -> primitives: FileId, Name interning, Position, LineIndex
//! ```

// ============================================================================
// MODULES (dependency order: base -> diagnostics -> document -> decode ->
// resolve -> validate -> exec -> trace)
// ============================================================================

/// Foundation types: file ids, interned names, source positions.
pub mod base;

/// The structured diagnostic vocabulary every other module reports through.
pub mod diagnostics;

/// The typed BSIF document model.
pub mod document;

/// Raw bytes to typed document.
pub mod decode;

/// Multi-file reference composition.
pub mod resolve;

/// The semantic validator.
pub mod validate;

/// The state-machine executor.
pub mod exec;

/// The LTL finite-trace checker.
pub mod trace;

/// JSON Schema export and the formal-methods projection boundary.
#[cfg(feature = "interchange")]
pub mod interchange;

mod error;

pub use error::CoreError;

// Re-export foundation types.
pub use base::{FileId, FileTable, LineIndex, Name, Position, SourceLocation};

// Re-export the diagnostic vocabulary.
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};

// Re-export the document model.
pub use document::BsifDocument;

// Re-export the decoder entry point.
pub use decode::decode;

// Re-export the validator entry point.
pub use validate::validate;

// Re-export the resolver entry point.
pub use resolve::resolve;

// Re-export the LTL checker entry point.
pub use trace::check_trace;

// Re-export the state-machine executor's instance type.
pub use exec::StateMachineInstance;

// Re-export the interchange entry points.
#[cfg(feature = "interchange")]
pub use interchange::{json_schema, to_canonical_json};
