use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Error, Result};

pub const MEAL_PLAN_KEY: &str = "mealPlan";
pub const DAILY_EXTRAS_KEY: &str = "dailyExtras";
pub const NUTRITION_GOALS_KEY: &str = "nutritionGoals";

/// Per-device key/value persistence holding JSON documents.
pub trait Storage: Send + Sync {
    fn load_raw(&self, key: &str) -> Result<Option<Value>>;

    fn save_raw(&self, key: &str, value: Value) -> Result<()>;
}

pub trait StorageExt: Storage {
    /// Loads and decodes `key`. `Ok(None)` when nothing is stored.
    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.load_raw(key)? else {
            return Ok(None);
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|err| Error::Storage(format!("decode {key}: {err}")))
    }

    /// Like [`StorageExt::try_load`], but unreadable or malformed documents
    /// are logged and reported as absent.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_load(key)
            .inspect_err(|err| tracing::warn!(key, error = %err, "discarding stored document"))
            .ok()
            .flatten()
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|err| Error::Storage(format!("serialize {key}: {err}")))?;

        self.save_raw(key, value)
    }

    /// Best-effort save: a failure is logged and swallowed.
    fn persist<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match self.save(key, value) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to persist");
                false
            }
        }
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

impl<S: Storage + ?Sized> Storage for &S {
    fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        (**self).load_raw(key)
    }

    fn save_raw(&self, key: &str, value: Value) -> Result<()> {
        (**self).save_raw(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        (**self).load_raw(key)
    }

    fn save_raw(&self, key: &str, value: Value) -> Result<()> {
        (**self).save_raw(key, value)
    }
}

/// Stores every key as `<namespace>.<key>.json` under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    namespace: String,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            namespace: namespace.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{key}.json", self.namespace))
    }
}

impl Storage for FileStorage {
    fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        let content = match fs::read_to_string(self.path(key)) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save_raw(&self, key: &str, value: Value) -> Result<()> {
        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            let path = self.path(key);
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, serde_json::to_vec_pretty(&value)?)?;
            fs::rename(tmp, path)
        };

        write().map_err(|err| Error::Storage(format!("write {key}: {err}")))
    }
}

/// In-process storage, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Value>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, as a full quota would.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or_default()
    }
}

impl Storage for MemoryStorage {
    fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        let entries = self
            .entries
            .lock()
            .map_err(|err| Error::Storage(err.to_string()))?;

        Ok(entries.get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: Value) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage(format!("quota exceeded writing {key}")));
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|err| Error::Storage(err.to_string()))?;
        entries.insert(key.to_owned(), value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use temp_dir::TempDir;

    #[test]
    fn test_file_storage_round_trip() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(dir.path(), "test");

        let mut value = BTreeMap::new();
        value.insert("2025-01-01".to_owned(), vec![1, 2, 3]);
        storage.save("numbers", &value)?;

        assert!(dir.child("test.numbers.json").exists());
        let loaded: Option<BTreeMap<String, Vec<i32>>> = storage.load("numbers");
        assert_eq!(loaded, Some(value));

        Ok(())
    }

    #[test]
    fn test_file_storage_missing_key_is_absent() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(dir.path(), "test");

        assert_eq!(storage.load_raw("nothing")?, None);
        assert_eq!(storage.load::<Vec<i32>>("nothing"), None);

        Ok(())
    }

    #[test]
    fn test_corrupt_document_loads_as_absent() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(dir.child("test.broken.json"), "{ not json")?;
        let storage = FileStorage::new(dir.path(), "test");

        assert!(storage.load_raw("broken").is_err());
        assert_eq!(storage.load::<Vec<i32>>("broken"), None);

        Ok(())
    }

    #[test]
    fn test_memory_storage_write_failure_is_reported() {
        let storage = MemoryStorage::new();
        assert!(storage.persist("a", &1));

        storage.fail_writes(true);
        assert!(!storage.persist("a", &2));
        assert!(matches!(storage.save("a", &2), Err(Error::Storage(_))));
        assert_eq!(storage.load::<i32>("a"), Some(1));
    }
}
