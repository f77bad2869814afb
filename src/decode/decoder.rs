//! The typed decoder: raw bytes in, a [`BsifDocument`] or a single
//! fail-fast [`Diagnostic`] out.
//!
//! Decoding runs in a fixed pipeline: detect the format, enforce the
//! byte-length limit, parse into a format's own value type, convert
//! that into the generic [`DecodeValue`] tree (enforcing depth and
//! string-length limits as it goes), hand the tree to `serde` to build
//! the typed document, then run the structural invariant checks once.
//! Unlike the validator, the decoder stops at the first problem it
//! finds rather than accumulating every one.
//!
//! Every diagnostic the decoder returns goes through a [`SourceMap`]
//! built from the input buffer (`spec.md` §4.1's "source map"), so it
//! carries a `{file, line, column}` location rather than leaving one
//! unset: `serde_json`'s own line/column for a syntax error, or a
//! best-effort resolution of the diagnostic's JSON pointer `path`
//! against the raw text for a structural error.

use std::path::Path;

use super::format::Format;
use super::limits::DecodeLimits;
use super::source_map::SourceMap;
use super::tree::DecodeValue;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::document::{structural_diagnostics, BsifDocument};

/// Decode a document from `bytes`, using `path` (if given) for format
/// detection by extension and as the `file` field of any location
/// attached to diagnostics.
pub fn decode(bytes: &[u8], path: Option<&Path>, limits: &DecodeLimits) -> Result<BsifDocument, Diagnostic> {
    let source_name = path.map(|p| p.display().to_string()).unwrap_or_else(|| "<input>".to_string());
    let source = SourceMap::new(bytes, source_name);

    if bytes.len() > limits.max_bytes {
        return Err(Diagnostic::new(
            DiagnosticCode::DocumentTooLarge,
            format!(
                "document is {} bytes, exceeding the {}-byte limit",
                bytes.len(),
                limits.max_bytes
            ),
        ));
    }

    let format = path
        .and_then(Format::from_extension)
        .or_else(|| Format::sniff(bytes))
        .ok_or_else(|| {
            Diagnostic::new(
                DiagnosticCode::InvalidSyntax,
                "could not determine whether input is JSON or YAML",
            )
        })?;

    let tree = parse_to_tree(bytes, format, limits, &source)?;
    let doc = schema_walk(tree)?;

    if let Some(first) = structural_diagnostics(&doc).into_iter().find(Diagnostic::is_error) {
        return Err(source.attach(first));
    }

    Ok(doc)
}

fn parse_to_tree(bytes: &[u8], format: Format, limits: &DecodeLimits, source: &SourceMap) -> Result<DecodeValue, Diagnostic> {
    match format {
        Format::Json => {
            let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
                Diagnostic::new(DiagnosticCode::InvalidJson, format!("invalid JSON: {e}"))
                    .with_location(source.json_error_location(&e))
            })?;
            DecodeValue::from_json(value, limits)
        }
        Format::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_slice(bytes).map_err(|e| {
                Diagnostic::new(DiagnosticCode::InvalidYaml, format!("invalid YAML: {e}"))
            })?;
            DecodeValue::from_yaml(value, limits)
        }
    }
}

/// Build a typed [`BsifDocument`] from a limit-checked generic tree.
///
/// This delegates the actual field-by-field walk to `serde`'s own
/// `Deserialize` impls (derived on every document type), translating
/// whatever `serde_json` reports into a [`Diagnostic`]. The structural
/// checks that need precise JSON-pointer paths (unknown states,
/// dangling references, duplicate names, ...) are not decode errors at
/// all here: they are caught afterward by [`structural_diagnostics`],
/// which walks the already-typed document and can point at a path far
/// more precisely than a deserialization failure can.
fn schema_walk(tree: DecodeValue) -> Result<BsifDocument, Diagnostic> {
    let value = tree.into_json();
    serde_json::from_value(value).map_err(|e| classify_schema_error(&e))
}

fn classify_schema_error(e: &serde_json::Error) -> Diagnostic {
    let message = e.to_string();
    let code = if message.contains("missing field") {
        DiagnosticCode::MissingRequiredField
    } else if message.contains("unknown field") {
        DiagnosticCode::UnknownField
    } else if message.contains("invalid type") || message.contains("invalid value") {
        DiagnosticCode::InvalidFieldValue
    } else {
        DiagnosticCode::InvalidSyntax
    };
    Diagnostic::new(code, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_state_machine_json() -> &'static str {
        r#"{
            "metadata": {"bsif_version": "1.0.0", "name": "light"},
            "semantics": {
                "type": "state-machine",
                "states": [{"name": "red"}, {"name": "green"}],
                "transitions": [{"from": "red", "to": "green", "event": "go"}],
                "initial": "red",
                "final": []
            }
        }"#
    }

    #[test]
    fn decodes_valid_state_machine() {
        let doc = decode(valid_state_machine_json().as_bytes(), None, &DecodeLimits::default()).unwrap();
        assert_eq!(doc.metadata.name, "light");
    }

    #[test]
    fn rejects_missing_required_field() {
        let json = r#"{"metadata": {"name": "x"}, "semantics": {"type": "events", "events": {}}}"#;
        let err = decode(json.as_bytes(), None, &DecodeLimits::default()).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::MissingRequiredField);
    }

    #[test]
    fn rejects_unknown_field() {
        let json = r#"{
            "metadata": {"bsif_version": "1.0.0", "name": "x"},
            "semantics": {"type": "events", "events": {}},
            "bogus": true
        }"#;
        let err = decode(json.as_bytes(), None, &DecodeLimits::default()).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::UnknownField);
    }

    #[test]
    fn rejects_unknown_initial_state_as_structural() {
        let json = r#"{
            "metadata": {"bsif_version": "1.0.0", "name": "x"},
            "semantics": {
                "type": "state-machine",
                "states": [{"name": "a"}],
                "transitions": [],
                "initial": "missing",
                "final": []
            }
        }"#;
        let err = decode(json.as_bytes(), None, &DecodeLimits::default()).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::UnknownState);
    }

    #[test]
    fn decodes_yaml_input() {
        let yaml = "metadata:\n  bsif_version: 1.0.0\n  name: x\nsemantics:\n  type: events\n  events: {}\n";
        let doc = decode(yaml.as_bytes(), None, &DecodeLimits::default()).unwrap();
        assert_eq!(doc.metadata.name, "x");
    }

    #[test]
    fn rejects_document_over_byte_limit() {
        let limits = DecodeLimits { max_bytes: 4, ..DecodeLimits::default() };
        let err = decode(b"{\"a\": 1}", None, &limits).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::DocumentTooLarge);
    }

    #[test]
    fn structural_error_carries_a_resolved_location() {
        let json = r#"{
            "metadata": {"bsif_version": "1.0.0", "name": "x"},
            "semantics": {
                "type": "state-machine",
                "states": [{"name": "a"}],
                "transitions": [],
                "initial": "missing",
                "final": []
            }
        }"#;
        let err = decode(json.as_bytes(), Some(Path::new("machine.json")), &DecodeLimits::default()).unwrap_err();
        let location = err.location.expect("structural diagnostic should carry a resolved location");
        assert_eq!(location.file, "machine.json");
        assert!(location.line > 0);
    }

    #[test]
    fn invalid_json_syntax_error_carries_the_parser_location() {
        let json = "{\"metadata\": {\n  \"name\": ,\n}}";
        let err = decode(json.as_bytes(), None, &DecodeLimits::default()).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::InvalidJson);
        let location = err.location.expect("JSON syntax errors should carry a parser-reported location");
        assert_eq!(location.line, 1);
    }
}
