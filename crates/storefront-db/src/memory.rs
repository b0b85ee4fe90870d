//! # In-Process Store
//!
//! A [`KeyValueStore`] backed by a `HashMap`. Clones share the same map,
//! which makes it easy to simulate two pages reading one store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::DbResult;
use crate::store::KeyValueStore;

/// Key-value store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn write_batch(&self, set: &[(&str, String)], remove: &[&str]) -> DbResult<()> {
        let mut map = self.entries.lock().await;
        for (key, value) in set {
            map.insert((*key).to_string(), value.clone());
        }
        for key in remove {
            map.remove(*key);
        }
        Ok(())
    }
}
