use std::collections::HashMap;

use crate::error::{StorageError, StorageResult};

/// Synchronous string key-value store that drafts are persisted to.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;

    fn write(&mut self, key: &str, value: String) -> StorageResult<()>;
}

/// eframe's app storage: browser local storage on the web, a file in the
/// app's data directory natively.
impl KeyValueStore for dyn eframe::Storage + '_ {
    fn read(&self, key: &str) -> Option<String> {
        self.get_string(key)
    }

    fn write(&mut self, key: &str, value: String) -> StorageResult<()> {
        self.set_string(key, value);
        self.flush();
        Ok(())
    }
}

/// In-memory store, optionally unavailable or size-limited.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    available: bool,
    quota: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// A store that refuses every write.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Limits the combined size of all keys and values to `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_owned(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn size_with(&self, key: &str, value: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
            + key.len()
            + value.len()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: String) -> StorageResult<()> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        if let Some(quota) = self.quota {
            if self.size_with(key, &value) > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    quota,
                });
            }
        }
        self.values.insert(key.to_owned(), value);
        self.writes += 1;
        Ok(())
    }
}
