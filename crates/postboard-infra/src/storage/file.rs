//! File-backed storage - a JSON object of key/value pairs on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use postboard_core::error::StorageError;
use postboard_core::ports::KeyValueStore;

use super::{check_quota, poisoned};

/// Durable key/value store persisted to a single JSON file.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so a reader never observes a half-written file.
pub struct FileStorage {
    path: PathBuf,
    quota: Option<usize>,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`. An unreadable or
    /// malformed file is treated as empty and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path);
        tracing::info!(path = %path.display(), keys = values.len(), "File storage opened");

        Self {
            path,
            quota: None,
            values: RwLock::new(values),
        }
    }

    /// Limit the size of the serialized file, in bytes.
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Storage file unreadable");
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Storage file malformed");
            BTreeMap::new()
        })
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(values)?;
        check_quota(contents.len(), self.quota)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), "Storage file written");
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;

        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());
        self.write(&next)?;

        *values = next;
        Ok(())
    }
}
