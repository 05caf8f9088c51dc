//! Key-value storage
//!
//! Presets and run history are persisted through a deliberately narrow
//! string-to-string interface so the backing medium stays swappable. The
//! bundled backends are an in-memory map and a single JSON document on disk;
//! everything above this trait treats storage as an opaque service.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be decoded
    #[error("corrupt store document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Narrow key-value interface the persistence layer is written against.
pub trait KvStore {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store backed by a map, used in tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON document, rewritten on every mutation.
///
/// The document is a flat string-to-string object, so it stays readable and
/// diffable; values are themselves JSON payloads owned by the callers.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open (or create on first write) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("presets", r#"[{"name":"smoke"}]"#).unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(
            store.get("presets").unwrap().as_deref(),
            Some(r#"[{"name":"smoke"}]"#)
        );
    }

    #[test]
    fn file_store_rejects_corrupt_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }
}
