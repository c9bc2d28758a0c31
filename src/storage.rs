//! Byte storage behind file entries.
//!
//! The namespace only tracks names. File content lives outside of it, keyed by
//! the entry name, and is only touched by `cp`.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Where file content is kept.
pub trait ContentStore {
    /// Copy all bytes of `source` into `destination`, replacing its content.
    ///
    /// Returns the number of bytes copied.
    fn copy(&mut self, source: &str, destination: &str) -> io::Result<u64>;
}

/// Content stored as real files inside a host directory.
#[derive(Debug, Clone)]
pub struct HostStore {
    root: PathBuf,
}

impl HostStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host path of the file backing the entry called `name`.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ContentStore for HostStore {
    fn copy(&mut self, source: &str, destination: &str) -> io::Result<u64> {
        // Open the source first so a missing source never truncates the destination.
        let mut reader = File::open(self.path_of(source))?;
        let mut writer = File::create(self.path_of(destination))?;
        let copied = io::copy(&mut reader, &mut writer)?;
        writer.sync_all()?;
        tracing::debug!(source, destination, bytes = copied, "copied host file");
        Ok(copied)
    }
}

/// Content kept in memory, for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), data.into());
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }
}

impl ContentStore for MemoryStore {
    fn copy(&mut self, source: &str, destination: &str) -> io::Result<u64> {
        let data = self.files.get(source).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no content for {source}"))
        })?;
        let len = data.len() as u64;
        self.files.insert(destination.to_string(), data);
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_host_store_copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let mut store = HostStore::new(dir.path());
        let copied = store.copy("a.txt", "b.txt").unwrap();

        assert_eq!(copied, 5);
        assert_eq!(fs::read(dir.path().join("b.txt")).unwrap(), b"hello");
        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"hello");
    }

    #[test]
    fn test_host_store_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"new").unwrap();
        fs::write(dir.path().join("b.txt"), b"much older content").unwrap();

        let mut store = HostStore::new(dir.path());
        store.copy("a.txt", "b.txt").unwrap();

        assert_eq!(fs::read(dir.path().join("b.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_host_store_missing_source_leaves_destination_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HostStore::new(dir.path());

        let err = store.copy("missing.txt", "b.txt").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dir.path().join("b.txt").exists());
    }

    #[test]
    fn test_memory_store_copy() {
        let mut store = MemoryStore::new();
        store.insert("a.txt", "hello");

        assert_eq!(store.copy("a.txt", "b.txt").unwrap(), 5);
        assert_eq!(store.get("b.txt"), Some(&b"hello"[..]));
        assert!(store.copy("nope", "c.txt").is_err());
        assert_eq!(store.get("c.txt"), None);
    }
}
