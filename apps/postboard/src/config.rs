//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use postboard_core::ControllerConfig;
use postboard_core::ports::KeyValueStore;
use postboard_core::validation::DEFAULT_MAX_IMAGE_BYTES;
use postboard_infra::{FileStorage, InMemoryStorage};

/// Where posts are kept between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    File(PathBuf),
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    /// Byte limit for the storage backend.
    pub storage_quota: Option<usize>,
    pub controller: ControllerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let storage = match env::var("POSTBOARD_STORAGE").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            _ => StorageBackend::File(
                env::var("POSTBOARD_STORAGE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("postboard-storage.json")),
            ),
        };

        Self {
            storage,
            storage_quota: env::var("POSTBOARD_STORAGE_QUOTA")
                .ok()
                .and_then(|s| s.parse().ok()),
            controller: ControllerConfig {
                toast_duration: Duration::from_millis(
                    env::var("TOAST_DURATION_MS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(3000),
                ),
                max_image_bytes: env::var("MAX_IMAGE_BYTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_IMAGE_BYTES),
            },
        }
    }

    /// Build the configured storage backend.
    pub fn open_storage(&self) -> Arc<dyn KeyValueStore> {
        match (&self.storage, self.storage_quota) {
            (StorageBackend::Memory, Some(quota)) => Arc::new(InMemoryStorage::with_quota(quota)),
            (StorageBackend::Memory, None) => {
                tracing::warn!("Using in-memory storage, posts will not survive a restart");
                Arc::new(InMemoryStorage::new())
            }
            (StorageBackend::File(path), Some(quota)) => {
                Arc::new(FileStorage::open(path).with_quota(quota))
            }
            (StorageBackend::File(path), None) => Arc::new(FileStorage::open(path)),
        }
    }
}
