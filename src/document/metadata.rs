use serde::{Deserialize, Serialize};

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    pub bsif_version: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Metadata {
    /// The major version component of `bsif_version`, used by the
    /// resolver's version-compatibility check.
    ///
    /// Only meaningful once [`Metadata::bsif_version_is_valid`] holds;
    /// callers that have already decoded a document may rely on that.
    pub fn major_version(&self) -> Option<u64> {
        self.bsif_version.split('.').next()?.parse().ok()
    }

    /// Whether `bsif_version` matches `^\d+\.\d+\.\d+$`.
    pub fn bsif_version_is_valid(&self) -> bool {
        let mut parts = self.bsif_version.split('.');
        let valid_component = |s: Option<&str>| {
            s.is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        };
        let ok = valid_component(parts.next())
            && valid_component(parts.next())
            && valid_component(parts.next());
        ok && parts.next().is_none()
    }

    /// Whether `name` is non-empty once surrounding whitespace is
    /// stripped. `serde` only enforces that the field is present; a
    /// present-but-blank `name` still violates §3.1's "required
    /// non-empty".
    pub fn name_is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(version: &str) -> Metadata {
        Metadata {
            bsif_version: version.to_string(),
            name: "x".to_string(),
            version: None,
            description: None,
            authors: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn accepts_semver() {
        assert!(meta("1.0.0").bsif_version_is_valid());
        assert_eq!(meta("1.0.0").major_version(), Some(1));
    }

    #[test]
    fn rejects_malformed() {
        assert!(!meta("1.0").bsif_version_is_valid());
        assert!(!meta("1.0.0-beta").bsif_version_is_valid());
        assert!(!meta("v1.0.0").bsif_version_is_valid());
    }

    #[test]
    fn rejects_empty_or_blank_name() {
        let mut m = meta("1.0.0");
        m.name = String::new();
        assert!(!m.name_is_valid());
        m.name = "   ".to_string();
        assert!(!m.name_is_valid());
        m.name = "light".to_string();
        assert!(m.name_is_valid());
    }
}
