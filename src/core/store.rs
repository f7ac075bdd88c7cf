use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::WorkflowError;

/// Key/value storage for serialized snapshots.
///
/// The store only moves strings; parsing and sanitizing belong to
/// [`crate::snapshot::load_snapshot`].
pub trait SnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, WorkflowError>;
    fn save(&mut self, key: &str, raw: &str) -> Result<(), WorkflowError>;
}

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    data: HashMap<String, String>,
    writes: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `raw` under `key`.
    pub fn with_entry(key: &str, raw: &str) -> Self {
        let mut data = HashMap::new();
        data.insert(key.to_string(), raw.to_string());
        Self { data, writes: 0 }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Number of `save` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, WorkflowError> {
        Ok(self.data.get(key).cloned())
    }

    fn save(&mut self, key: &str, raw: &str) -> Result<(), WorkflowError> {
        self.data.insert(key.to_string(), raw.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, WorkflowError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, WorkflowError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, raw: &str) -> Result<(), WorkflowError> {
        std::fs::write(self.path_for(key), raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemorySnapshotStore::new();
        assert_eq!(store.load("workflow").unwrap(), None);
        store.save("workflow", "{}").unwrap();
        assert_eq!(store.load("workflow").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_memory_store_seeded() {
        let store = MemorySnapshotStore::with_entry("workflow", "not-json");
        assert_eq!(store.get("workflow"), Some("not-json"));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSnapshotStore::new(dir.path().join("nested")).unwrap();
        assert_eq!(store.load("workflow").unwrap(), None);

        store.save("workflow", r#"{"nodes":[],"edges":[]}"#).unwrap();
        assert_eq!(
            store.load("workflow").unwrap().as_deref(),
            Some(r#"{"nodes":[],"edges":[]}"#)
        );
        assert!(dir.path().join("nested").join("workflow.json").exists());
    }
}
