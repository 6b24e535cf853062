//! Key/value storage - a JSON file on disk and an in-memory fallback.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::InMemoryStorage;

use postboard_core::error::StorageError;

/// Reject a write that would push the stored size past `limit`.
fn check_quota(needed: usize, limit: Option<usize>) -> Result<(), StorageError> {
    match limit {
        Some(limit) if needed > limit => Err(StorageError::QuotaExceeded { needed, limit }),
        _ => Ok(()),
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("storage lock poisoned".to_string())
}
