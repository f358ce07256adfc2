//! Local persistence for the watchlist and topic groups
//!
//! Collections are stored as whole JSON values under a fixed key and
//! rewritten on every mutation. Storage failures never reach the user: a
//! value that cannot be read loads as an empty collection and a failed write
//! is logged and otherwise ignored.

pub mod topics;
pub mod watchlist;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::error::PersistenceError;

pub use topics::{default_topics, TopicGroups, TOPICS_KEY};
pub use watchlist::{Watchlist, WATCHLIST_KEY};

/// String key-value storage
pub trait KeyValueStore: Send + Sync {
  fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
  fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
  fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
    (**self).get(key)
  }

  fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
    (**self).set(key, value)
  }
}

/// One `<key>.json` file per key under a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
  dir: PathBuf,
}

impl FileStore {
  /// Store rooted at `dir`. The directory is created on first write.
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
    if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
      return Err(PersistenceError::unavailable(format!("invalid storage key '{key}'")));
    }
    Ok(self.dir.join(format!("{key}.json")))
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
    let path = self.path_for(key)?;
    if !path.exists() {
      return Ok(None);
    }
    Ok(Some(std::fs::read_to_string(path)?))
  }

  fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
    let path = self.path_for(key)?;
    std::fs::create_dir_all(&self.dir)?;
    std::fs::write(&path, value)?;
    debug!(path = %path.display(), "stored value");
    Ok(())
  }
}

/// Process-local store, used by tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
  values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_value(key: &str, value: &str) -> Self {
    let values = HashMap::from([(key.to_string(), value.to_string())]);
    Self { values: Mutex::new(values) }
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
    let values = self.values.lock().map_err(|_| PersistenceError::unavailable("memory store poisoned"))?;
    Ok(values.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
    let mut values = self.values.lock().map_err(|_| PersistenceError::unavailable("memory store poisoned"))?;
    values.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// Read a stored list. `None` means the key has never been written; a value
/// that cannot be read or parsed loads as an empty list.
pub(crate) fn read_collection<S, T>(store: &S, key: &str) -> Option<Vec<T>>
where
  S: KeyValueStore + ?Sized,
  T: DeserializeOwned,
{
  let raw = match store.get(key) {
    Ok(Some(raw)) => raw,
    Ok(None) => return None,
    Err(e) => {
      warn!(key, error = %e, "could not read stored collection");
      return Some(Vec::new());
    }
  };

  match serde_json::from_str::<Vec<T>>(&raw) {
    Ok(items) => Some(items),
    Err(e) => {
      warn!(key, error = %PersistenceError::from(e), "discarding stored collection");
      Some(Vec::new())
    }
  }
}

/// Overwrite a stored list, logging instead of failing
pub(crate) fn write_collection<S, T>(store: &S, key: &str, items: &[T])
where
  S: KeyValueStore + ?Sized,
  T: Serialize,
{
  let result = serde_json::to_string(items)
    .map_err(PersistenceError::from)
    .and_then(|json| store.set(key, &json));

  if let Err(e) = result {
    warn!(key, error = %e, "could not save collection");
  }
}

/// Keep the first item for each id
pub(crate) fn dedupe_by<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
  K: Eq + Hash,
  F: Fn(&T) -> K,
{
  let mut seen = HashSet::new();
  items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_file_store_roundtrip_and_missing_key() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("nested"));

    assert_eq!(store.get("parliament-navigator-topics").unwrap(), None);
    assert!(!dir.path().join("nested").exists());
    store.set("parliament-navigator-topics", "[]").unwrap();
    assert_eq!(store.get("parliament-navigator-topics").unwrap().as_deref(), Some("[]"));
    assert!(dir.path().join("nested/parliament-navigator-topics.json").exists());
  }

  #[test]
  fn test_file_store_rejects_path_like_keys() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());

    assert!(matches!(store.set("../escape", "x"), Err(PersistenceError::Unavailable { .. })));
    assert!(store.get("").is_err());
  }

  #[test]
  fn test_file_store_under_a_regular_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("notadir");
    std::fs::write(&blocker, "x").unwrap();
    let store = FileStore::new(blocker.join("sub"));

    assert_eq!(store.get(TOPICS_KEY).unwrap(), None);
    assert!(store.set(TOPICS_KEY, "[]").is_err());

    let topics = TopicGroups::load_or_seed(store);
    assert_eq!(topics.list().len(), 3);
  }

  #[test]
  fn test_read_collection_distinguishes_absent_from_corrupt() {
    let store = MemoryStore::new();
    assert_eq!(read_collection::<_, u32>(&store, "k"), None);

    let store = MemoryStore::with_value("k", "{not json");
    assert_eq!(read_collection::<_, u32>(&store, "k"), Some(Vec::new()));

    let store = MemoryStore::with_value("k", "[1,2]");
    assert_eq!(read_collection::<_, u32>(&store, "k"), Some(vec![1, 2]));
  }

  #[test]
  fn test_dedupe_keeps_first() {
    let items = vec![(1, "a"), (2, "b"), (1, "c")];
    assert_eq!(dedupe_by(items, |item| item.0), vec![(1, "a"), (2, "b")]);
  }
}
