use std::fmt;

/// Stable diagnostic codes.
///
/// - `E1xx`: structural. The decoder could not make sense of the raw
///   bytes against the schema.
/// - `E2xx`: semantic. The document parses, but the validator or
///   resolver found a cross-reference, reachability, or composition
///   problem.
/// - `W3xx`: warnings. The document is valid but suspicious.
///
/// The strings these render as are human prose for editor/CLI display,
/// never parsed back; only the code variant itself is a stable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // E1xx: structural
    InvalidSyntax,
    InvalidJson,
    InvalidYaml,
    InvalidFieldValue,
    MissingRequiredField,
    UnknownField,
    DocumentTooLarge,
    NestingTooDeep,
    StringTooLong,

    // E2xx: semantic
    UnknownState,
    UnreachableState,
    DuplicateName,
    UnknownParticipant,
    UnknownVariable,
    UnknownEvent,
    CircularReference,
    IncompatibleVersion,
    ResolutionLimit,
    NoTransition,

    // W3xx: warnings
    NondeterministicTransition,
    UnusedDeclaration,
}

impl DiagnosticCode {
    /// The severity a code carries by default. A validator may still
    /// downgrade or upgrade it, but codes are typed by their home range
    /// so this is almost always right.
    pub fn default_severity(self) -> Severity {
        use DiagnosticCode::*;
        match self {
            NondeterministicTransition | UnusedDeclaration => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// The stable code string, e.g. `"E0101"`, `"E0201"`, `"W0301"`.
    pub fn as_str(self) -> &'static str {
        use DiagnosticCode::*;
        match self {
            InvalidSyntax => "E0100",
            InvalidJson => "E0101",
            InvalidYaml => "E0102",
            InvalidFieldValue => "E0103",
            MissingRequiredField => "E0104",
            UnknownField => "E0105",
            DocumentTooLarge => "E0106",
            NestingTooDeep => "E0107",
            StringTooLong => "E0108",

            UnknownState => "E0200",
            UnreachableState => "E0201",
            DuplicateName => "E0202",
            UnknownParticipant => "E0203",
            UnknownVariable => "E0204",
            UnknownEvent => "E0205",
            CircularReference => "E0206",
            IncompatibleVersion => "E0207",
            ResolutionLimit => "E0208",
            NoTransition => "E0209",

            NondeterministicTransition => "W0300",
            UnusedDeclaration => "W0301",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
