/// The result of checking an LTL formula against a finite trace.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOutcome {
    pub holds: bool,
    /// The smallest index at which the shallowest violated sub-formula
    /// fails, present whenever `holds` is `false`.
    pub witness: Option<usize>,
    pub reason: Option<String>,
}

impl TraceOutcome {
    pub fn holding() -> Self {
        Self { holds: true, witness: None, reason: None }
    }

    pub fn violated(witness: usize) -> Self {
        Self {
            holds: false,
            witness: Some(witness),
            reason: Some(format!("formula does not hold at trace index {witness}")),
        }
    }
}
