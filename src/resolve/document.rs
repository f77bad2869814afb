use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::Name;
use crate::document::BsifDocument;

/// A document plus its immediate references, one node of the resolved
/// reference DAG.
///
/// Each node is keyed by its canonicalized absolute path and stored
/// once: re-entering an already-resolved path shares this same `Arc`
/// rather than re-loading and re-decoding it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDocument {
    pub path: PathBuf,
    pub document: BsifDocument,
    pub references: IndexMap<Name, Arc<ResolvedDocument>>,
}

impl ResolvedDocument {
    pub fn get(&self, name: &str) -> Option<&Arc<ResolvedDocument>> {
        self.references.get(name)
    }
}
