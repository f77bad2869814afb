use std::path::Path;

/// Seam for the host's file-reading I/O.
///
/// Lets an async host supply its own file interface,
/// with suspension only at read boundaries; the core itself only needs
/// a blocking read at each reference, so the trait stays synchronous
/// and an async host bridges it however it likes (e.g. blocking on its
/// own runtime handle) rather than the core depending on one.
pub trait FileLoader {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// The default loader: reads directly from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFsLoader;

impl FileLoader for StdFsLoader {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
