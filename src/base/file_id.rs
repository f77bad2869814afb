use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Interned identifier for a loaded document path.
///
/// Cloning a `FileId` is a pointer copy; the backing path lives in the
/// [`FileTable`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// Interns canonicalized document paths to small, cheaply-comparable ids.
///
/// The resolver and decoder both need to refer to "the document at this
/// path" from diagnostics, history, and the resolved DAG without carrying
/// a `PathBuf` everywhere; a `FileTable` is the single place paths become
/// `FileId`s.
#[derive(Debug, Default)]
pub struct FileTable {
    inner: Mutex<FileTableInner>,
}

#[derive(Debug, Default)]
struct FileTableInner {
    paths: Vec<Arc<Path>>,
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a path, returning its `FileId`. Re-interning an equal path
    /// (after canonicalization by the caller) returns the same id.
    pub fn intern(&self, path: impl Into<PathBuf>) -> FileId {
        let path: Arc<Path> = Arc::from(path.into());
        let mut inner = self.inner.lock().expect("FileTable mutex poisoned");
        if let Some(pos) = inner.paths.iter().position(|p| **p == *path) {
            return FileId(pos as u32);
        }
        inner.paths.push(path);
        FileId((inner.paths.len() - 1) as u32)
    }

    /// Look up the path for a previously interned id.
    pub fn path(&self, id: FileId) -> Arc<Path> {
        let inner = self.inner.lock().expect("FileTable mutex poisoned");
        inner.paths[id.0 as usize].clone()
    }
}
