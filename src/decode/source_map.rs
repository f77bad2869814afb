//! Maps a decoded document's raw bytes back to source locations, so a
//! diagnostic's JSON pointer `path` can be resolved to the
//! `{file, line, column}` `spec.md` §7 requires rather than leaving
//! `location` unset.
//!
//! There is no real JSON/YAML parser here tracking a span per node, so
//! resolution is a best-effort textual scan: each string path segment
//! advances a cursor to its quoted key, and a numeric segment (an array
//! index) is skipped, leaving the cursor at the last resolved key
//! rather than attempting to locate the nth sibling precisely.

use crate::base::{LineIndex, Position, SourceLocation};
use crate::diagnostics::Diagnostic;

pub struct SourceMap {
    file: String,
    text: Option<String>,
    index: Option<LineIndex>,
}

impl SourceMap {
    pub fn new(bytes: &[u8], file: impl Into<String>) -> Self {
        let text = std::str::from_utf8(bytes).ok().map(str::to_string);
        let index = text.as_deref().map(LineIndex::new);
        Self { file: file.into(), text, index }
    }

    fn at_offset(&self, offset: u32) -> Option<SourceLocation> {
        let index = self.index.as_ref()?;
        Some(SourceLocation::new(self.file.clone(), index.position(offset)))
    }

    /// Resolve a diagnostic's JSON pointer `path` against the raw text.
    fn locate(&self, path: &[String]) -> Option<SourceLocation> {
        let text = self.text.as_deref()?;
        let mut cursor = 0usize;
        let mut found_any = false;
        for segment in path {
            if segment.parse::<usize>().is_ok() {
                continue;
            }
            let needle = format!("\"{segment}\"");
            if let Some(relative) = text[cursor..].find(&needle) {
                cursor += relative;
                found_any = true;
            }
        }
        if !found_any {
            return None;
        }
        self.at_offset(cursor as u32)
    }

    /// The precise location `serde_json` reports for a parse failure,
    /// converted from its 1-indexed line/column to the 0-indexed
    /// [`Position`] the rest of the pipeline uses.
    pub fn json_error_location(&self, error: &serde_json::Error) -> SourceLocation {
        SourceLocation::new(
            self.file.clone(),
            Position::new((error.line().max(1) - 1) as u32, (error.column().max(1) - 1) as u32),
        )
    }

    /// Attach a location to `diagnostic` by resolving its `path`, unless
    /// it already carries one.
    pub fn attach(&self, diagnostic: Diagnostic) -> Diagnostic {
        if diagnostic.location.is_some() {
            return diagnostic;
        }
        match self.locate(&diagnostic.path) {
            Some(location) => diagnostic.with_location(location),
            None => diagnostic,
        }
    }
}
