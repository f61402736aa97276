//! Client-local key/value storage.
//!
//! A small string-to-string store persisted as a single JSON file in the
//! application data directory. Writes go through to disk immediately so a
//! crash never loses the authenticated state.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Store file name in the data directory
const STORE_FILE: &str = "store.json";

pub struct Storage {
    data_dir: PathBuf,
    values: HashMap<String, String>,
}

impl Storage {
    /// An empty store for the given directory, ignoring anything on disk.
    /// Used to recover from a corrupt store file; the next persist
    /// overwrites it.
    pub fn empty(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            values: HashMap::new(),
        }
    }

    /// Open the store, reading any existing file from disk.
    ///
    /// A missing file is an empty store; a corrupt file is an error so the
    /// caller can decide whether to start fresh.
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let path = data_dir.join(STORE_FILE);
        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read storage file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse storage file")?
        } else {
            HashMap::new()
        };
        Ok(Self { data_dir, values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value and persist
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    /// Set several values with a single write to disk
    pub fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.values.insert((*key).to_string(), (*value).to_string());
        }
        self.persist()
    }

    /// Remove a value and persist; removing an absent key is a no-op
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    /// Remove several values with a single write to disk
    pub fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        let mut changed = false;
        for key in keys {
            changed |= self.values.remove(*key).is_some();
        }
        if changed {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        let contents = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(self.data_dir.join(STORE_FILE), contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Storage::open(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.get("session_token"), None);
        store.set("session_token", "tok-abc").unwrap();
        assert_eq!(store.get("session_token"), Some("tok-abc"));

        store.remove("session_token").unwrap();
        assert_eq!(store.get("session_token"), None);
        // Removing again is a no-op
        store.remove("session_token").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = Storage::open(dir.path().to_path_buf()).unwrap();
            store.set("anonymous_id", "#4782").unwrap();
            store.set("user_id", "42").unwrap();
        }
        let store = Storage::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("anonymous_id"), Some("#4782"));
        assert_eq!(store.get("user_id"), Some("42"));
    }

    #[test]
    fn test_missing_dir_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Storage::open(dir.path().join("nested")).unwrap();
        assert_eq!(store.get("anything"), None);
    }
}
