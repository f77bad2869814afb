//! Foundation types shared by every other module: interned document ids,
//! source positions, and a byte-offset line index.
//!
//! This module has no dependency on any other `bsif_core` module.

mod file_id;
mod intern;
mod line_index;
mod position;

pub use file_id::{FileId, FileTable};
pub use intern::Name;
pub use line_index::LineIndex;
pub use position::{Position, SourceLocation};
