use crate::error::StorageError;

/// Durable string key/value store - abstraction over browser local storage,
/// a file on disk, or memory.
///
/// Writes are whole-value and blocking: once `set` returns `Ok`, a later
/// `get` on the same key sees the new value.
pub trait KeyValueStore: Send + Sync {
    /// Get a value, `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
