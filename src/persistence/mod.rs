//! Key-value persistence seam
//!
//! The leaderboard is the only thing this game persists: one JSON value
//! under one fixed key. Storage failures must never interrupt gameplay, so
//! the trait surface is infallible - implementations swallow errors and log
//! instead of returning them.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Host-provided durable key-value store
pub trait KeyValueStore {
    /// Returns the stored value, or `None` if missing or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Stores the value. Failures are swallowed by the implementation.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_owned(), value.to_owned());
    }
}

/// File-backed store: one `<key>.json` file per key under a root directory
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.root) {
            log::warn!("could not create store directory {:?}: {err}", self.root);
            return;
        }
        if let Err(err) = fs::write(self.path_for(key), value) {
            log::warn!("could not write {key}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("scores"), None);

        store.set("scores", "[1,2,3]");
        assert_eq!(store.get("scores").as_deref(), Some("[1,2,3]"));

        store.set("scores", "[]");
        assert_eq!(store.get("scores").as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("blockbreak_test_{}", std::process::id()));
        let mut store = FileStore::new(&dir);

        assert_eq!(store.get("scores"), None);
        store.set("scores", r#"[{"initials":"ABC","score":42}]"#);
        assert_eq!(
            store.get("scores").as_deref(),
            Some(r#"[{"initials":"ABC","score":42}]"#)
        );

        let _ = fs::remove_dir_all(&dir);
    }
}
