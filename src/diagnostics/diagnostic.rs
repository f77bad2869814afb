use super::codes::{DiagnosticCode, Severity};
use crate::base::SourceLocation;

/// A single structured diagnostic, produced by the decoder, validator,
/// resolver, or executor.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    /// JSON pointer path to the offending node, e.g. `["semantics", "initial"]`.
    pub path: Vec<String>,
    pub location: Option<SourceLocation>,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            message: message.into(),
            path: Vec::new(),
            location: None,
            suggestion: None,
        }
    }

    pub fn with_path(mut self, path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// JSON pointer rendering of `path`, e.g. `/semantics/initial`.
    pub fn pointer(&self) -> String {
        if self.path.is_empty() {
            return String::new();
        }
        let mut pointer = String::new();
        for segment in &self.path {
            pointer.push('/');
            pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        }
        pointer
    }

    /// Render as a `file:line:column: severity[code]: message` line,
    /// suitable for editor integration.
    pub fn render(&self, source_name: &str) -> String {
        let mut out = String::new();
        match &self.location {
            Some(loc) => out.push_str(&format!("{source_name}:{}:{}", loc.line + 1, loc.column + 1)),
            None => out.push_str(source_name),
        }
        out.push_str(&format!(
            ": {} [{}]: {}",
            self.severity, self.code, self.message
        ));
        if !self.path.is_empty() {
            out.push_str(&format!(" ({})", self.pointer()));
        }
        if let Some(suggestion) = &self.suggestion {
            out.push_str(&format!("\n  suggestion: {suggestion}"));
        }
        out
    }
}
