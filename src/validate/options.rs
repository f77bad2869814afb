/// Options controlling how much the validator checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// When `false`, only the structural invariants already enforced by
    /// the decoder are re-checked; no reachability, determinism, LTL,
    /// constraint, or handler checks run. Useful for re-validating a
    /// document that is known to have already passed semantic checks,
    /// or for callers that only care about structural well-formedness.
    pub check_semantics: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self { check_semantics: true }
    }
}
