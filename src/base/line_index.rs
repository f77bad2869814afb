use super::position::Position;

/// Maps UTF-8 byte offsets in a source buffer to 0-indexed line/column
/// positions, so the decoder can turn a JSON pointer path into the
/// `SourceLocation` a diagnostic carries.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line.
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((offset + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset into a 0-indexed line/column position.
    ///
    /// The column is a byte offset within the line, not a codepoint
    /// count; this matches how the decoder tracks positions while
    /// walking the generic tree.
    pub fn position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insertion) => insertion.saturating_sub(1),
        };
        let column = offset - self.line_starts[line];
        Position::new(line as u32, column)
    }
}
