//! Structured diagnostic taxonomy: a stable code, a severity, a JSON
//! pointer path, an optional source location, and an optional
//! suggestion. Every other component reports through this type.

mod codes;
mod diagnostic;

pub use codes::{DiagnosticCode, Severity};
pub use diagnostic::Diagnostic;
