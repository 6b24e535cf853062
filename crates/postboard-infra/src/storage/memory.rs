//! In-memory storage - used for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use postboard_core::error::StorageError;
use postboard_core::ports::KeyValueStore;

use super::{check_quota, poisoned};

/// In-memory key/value store.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStorage {
    values: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total size of keys and values, in bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }
}

impl KeyValueStore for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;

        let others: usize = values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        check_quota(others + key.len() + value.len(), self.quota)?;

        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
