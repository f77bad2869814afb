use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::base::Name;

/// One entry of a document's `references` section: a path, interpreted
/// relative to the referencing document's directory, and an optional
/// pinned version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceSpec {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

pub type References = IndexMap<Name, ReferenceSpec>;
