//! Post store - the in-memory collection and its durable snapshot.

use std::sync::Arc;

use crate::domain::{Post, PostFields, generate_id, sample_posts};
use crate::error::StorageError;
use crate::ports::KeyValueStore;

/// Well-known key holding the JSON array of posts.
pub const POSTS_KEY: &str = "blogPosts";

/// Owns the post collection and writes it through to storage.
///
/// Mutations update memory first and then persist the whole collection. An
/// `Err` from a mutation means only the durable copy is stale: the change is
/// kept in memory for the rest of the session.
pub struct PostStore {
    storage: Arc<dyn KeyValueStore>,
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            posts: Vec::new(),
        }
    }

    /// Load the stored snapshot, or seed and persist the sample posts when
    /// there is none. A stored empty array counts as data.
    pub fn initialize(&mut self) -> Result<(), StorageError> {
        if let Some(posts) = self.load_snapshot() {
            tracing::info!(count = posts.len(), "Loaded posts from storage");
            self.posts = posts;
            return Ok(());
        }

        self.posts = sample_posts();
        tracing::info!(count = self.posts.len(), "Seeded sample posts");
        self.persist()
    }

    fn load_snapshot(&self) -> Option<Vec<Post>> {
        let raw = match self.storage.get(POSTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored posts");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(posts) => Some(posts),
            Err(e) => {
                tracing::warn!(error = %e, "Stored posts are malformed, ignoring them");
                None
            }
        }
    }

    pub fn list(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Append a new post built from validated fields.
    pub fn create(&mut self, fields: PostFields) -> Result<Post, StorageError> {
        let mut post = Post::new(fields);
        while self.find_by_id(&post.id).is_some() {
            post.id = generate_id(chrono::Utc::now());
        }

        tracing::debug!(post_id = %post.id, "Creating post");
        self.posts.push(post.clone());
        self.persist()?;
        Ok(post)
    }

    /// Replace the editable fields of a post. Returns `Ok(false)` without
    /// touching storage when the id is unknown.
    pub fn update(&mut self, id: &str, fields: PostFields) -> Result<bool, StorageError> {
        let Some(post) = self.posts.iter_mut().find(|post| post.id == id) else {
            tracing::debug!(post_id = %id, "Update skipped, post not found");
            return Ok(false);
        };

        post.apply(fields);
        tracing::debug!(post_id = %id, "Updated post");
        self.persist()?;
        Ok(true)
    }

    /// Remove a post. Returns `Ok(false)` without touching storage when the
    /// id is unknown.
    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        let Some(index) = self.posts.iter().position(|post| post.id == id) else {
            tracing::debug!(post_id = %id, "Delete skipped, post not found");
            return Ok(false);
        };

        self.posts.remove(index);
        tracing::debug!(post_id = %id, "Deleted post");
        self.persist()?;
        Ok(true)
    }

    /// Write the full collection under [`POSTS_KEY`].
    pub fn persist(&self) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(&self.posts)?;
        self.storage.set(POSTS_KEY, &snapshot).inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to persist posts");
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MapStorage {
        values: Mutex<HashMap<String, String>>,
        read_only: bool,
    }

    impl MapStorage {
        fn with(key: &str, value: &str) -> Self {
            let storage = Self::default();
            storage
                .values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            storage
        }

        fn raw(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }
    }

    impl KeyValueStore for MapStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.raw(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.read_only {
                return Err(StorageError::QuotaExceeded {
                    needed: value.len(),
                    limit: 0,
                });
            }
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn fields(title: &str, date: &str) -> PostFields {
        PostFields {
            title: title.to_string(),
            description: format!("About {title}"),
            image: String::new(),
            date: date.to_string(),
        }
    }

    fn seeded() -> (Arc<MapStorage>, PostStore) {
        let storage = Arc::new(MapStorage::default());
        let mut store = PostStore::new(storage.clone());
        store.initialize().unwrap();
        (storage, store)
    }

    #[test]
    fn test_initialize_seeds_empty_storage_once() {
        let (storage, mut store) = seeded();
        assert_eq!(store.len(), 3);
        assert!(storage.raw(POSTS_KEY).is_some());

        let created = store.create(fields("Mine", "2025-10-01")).unwrap();
        store.initialize().unwrap();
        assert_eq!(store.len(), 4);
        assert!(store.find_by_id(&created.id).is_some());

        let mut reopened = PostStore::new(storage.clone());
        reopened.initialize().unwrap();
        assert_eq!(reopened.len(), 4);
    }

    #[test]
    fn test_stored_empty_array_is_not_reseeded() {
        let storage = Arc::new(MapStorage::with(POSTS_KEY, "[]"));
        let mut store = PostStore::new(storage);
        store.initialize().unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_snapshot_falls_back_to_seed() {
        let storage = Arc::new(MapStorage::with(POSTS_KEY, "{not json"));
        let mut store = PostStore::new(storage.clone());
        store.initialize().unwrap();

        assert_eq!(store.len(), 3);
        let raw = storage.raw(POSTS_KEY).unwrap();
        assert!(serde_json::from_str::<Vec<Post>>(&raw).is_ok());
    }

    #[test]
    fn test_foreign_timestamps_do_not_discard_posts() {
        let raw = r#"[{"id":"mine","title":"Mine","description":"Kept","date":"2025-01-01","createdAt":"2025-01-01T08:00:00"},
            {"id":"bare","title":"Bare","description":"Kept","date":"2025-01-02","createdAt":"2025-01-02"}]"#;
        let storage = Arc::new(MapStorage::with(POSTS_KEY, raw));
        let mut store = PostStore::new(storage.clone());
        store.initialize().unwrap();

        assert_eq!(store.len(), 2);
        let mine = store.find_by_id("mine").unwrap();
        assert_eq!(mine.created_at, "2025-01-01T08:00:00");
        assert!(store.find_by_id("1").is_none());
        assert_eq!(storage.raw(POSTS_KEY).as_deref(), Some(raw));
    }

    #[test]
    fn test_create_then_find() {
        let (_, mut store) = seeded();
        let input = PostFields {
            image: "data:image/png;base64,AAAA".to_string(),
            ..fields("Fresh", "2025-10-02")
        };

        let created = store.create(input.clone()).unwrap();
        let found = store.find_by_id(&created.id).unwrap();

        assert!(!found.id.is_empty());
        assert_eq!(found.fields(), input);
        assert_eq!(found.created_at, created.created_at);
    }

    #[test]
    fn test_update_keeps_identity() {
        let (_, mut store) = seeded();
        let before = store.find_by_id("2").unwrap().clone();

        assert!(store.update("2", fields("Renamed", "2024-01-01")).unwrap());

        let after = store.find_by_id("2").unwrap();
        assert_eq!(after.title, "Renamed");
        assert_eq!(after.date, "2024-01-01");
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (_, mut store) = seeded();
        assert!(!store.update("missing", fields("x", "2025-01-01")).unwrap());
        assert_eq!(store.list(), sample_posts().as_slice());
    }

    #[test]
    fn test_delete() {
        let (storage, mut store) = seeded();

        assert!(store.delete("1").unwrap());
        assert!(store.find_by_id("1").is_none());
        assert!(!storage.raw(POSTS_KEY).unwrap().contains("\"id\":\"1\""));

        assert!(!store.delete("1").unwrap());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_persist_round_trip() {
        let (storage, mut store) = seeded();
        store.create(fields("Round trip", "2025-12-24")).unwrap();
        store.persist().unwrap();

        let mut reloaded = PostStore::new(storage);
        reloaded.initialize().unwrap();

        assert_eq!(reloaded.list(), store.list());
    }

    #[test]
    fn test_persist_failure_keeps_memory() {
        let storage = Arc::new(MapStorage {
            read_only: true,
            ..MapStorage::with(POSTS_KEY, "[]")
        });
        let mut store = PostStore::new(storage.clone());
        store.initialize().unwrap();

        let err = store.create(fields("Kept", "2025-01-01")).unwrap_err();

        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(storage.raw(POSTS_KEY).as_deref(), Some("[]"));
    }
}
