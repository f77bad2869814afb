use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::document::ConstraintsSemantics;

/// Exactly one of `function`, `method`+`class`, or `module` must be
/// present on a constraint target.
pub fn check_target(
    constraints: &ConstraintsSemantics,
    prefix: &[String],
    out: &mut Vec<Diagnostic>,
) {
    if !constraints.target.is_well_formed() {
        out.push(
            Diagnostic::new(
                DiagnosticCode::InvalidFieldValue,
                "constraint target must name exactly one of `function`, `method`+`class`, or `module`",
            )
            .with_path(prefix.iter().cloned().chain(["target".to_string()])),
        );
    }
}
