use std::path::Path;

/// Input serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Detect format from a path's extension.
    pub fn from_extension(path: &Path) -> Option<Format> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// Best-effort content sniffing for hosts that cannot provide a path
    /// (stdin, an HTTP body): the first non-whitespace byte of a JSON
    /// document is always `{`, `[`, `"`, a digit, `t`/`f`/`n`, or `-`;
    /// YAML documents overwhelmingly start with `---` or a bare mapping
    /// key. This is a fallback, not a replacement for the extension
    /// check, and a document that looks like neither fails decoding
    /// with `InvalidSyntax` rather than guessing further.
    pub fn sniff(bytes: &[u8]) -> Option<Format> {
        let text = std::str::from_utf8(bytes).ok()?;
        let trimmed = text.trim_start();
        if trimmed.starts_with("---") {
            return Some(Format::Yaml);
        }
        let first = trimmed.chars().next()?;
        if first == '{' || first == '[' {
            return Some(Format::Json);
        }
        // A line of the shape `key:` or `key: value` not inside braces
        // is the common case for a top-level YAML mapping.
        if let Some(line) = trimmed.lines().next() {
            if line.contains(':') && !line.trim_start().starts_with('{') {
                return Some(Format::Yaml);
            }
        }
        None
    }

    pub fn detect(path: &Path, bytes: &[u8]) -> Option<Format> {
        Self::from_extension(path).or_else(|| Self::sniff(bytes))
    }
}
