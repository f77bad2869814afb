//! The small set of failure modes that are genuinely exceptional rather
//! than data-shaped. Everything data-shaped (a malformed document, an
//! unreachable state, a dangling reference) is a [`crate::diagnostics::Diagnostic`],
//! not a [`CoreError`]; this type exists for I/O and encoding failures
//! that happen before there is a document to attach a diagnostic to.

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostics::Diagnostic;

/// Exceptional failures from decode, resolve, or execute.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Reading a document or a reference target from disk failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes read from a source were not valid UTF-8.
    #[error("`{path}` is not valid UTF-8: {source}")]
    Utf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A document failed to decode; carries the single diagnostic that
    /// explains why (the decoder is fail-fast, unlike the validator).
    #[error("{}", .0.message)]
    Decode(Diagnostic),
}

impl CoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn utf8(path: impl Into<PathBuf>, source: std::str::Utf8Error) -> Self {
        Self::Utf8 { path: path.into(), source }
    }

    /// The diagnostic this error carries, if it is decode-shaped or
    /// otherwise describes a document location.
    pub fn as_diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            CoreError::Decode(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}

impl From<Diagnostic> for CoreError {
    fn from(diagnostic: Diagnostic) -> Self {
        CoreError::Decode(diagnostic)
    }
}
