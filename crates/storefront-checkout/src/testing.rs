//! Store doubles for service tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use storefront_db::{DbError, DbResult, KeyValueStore, MemoryStore};

/// A [`MemoryStore`] whose writes can be switched to fail.
///
/// Reads always succeed, so a failed write can be checked against what a
/// fresh page would load.
#[derive(Debug, Clone, Default)]
pub struct FailingWrites {
    pub inner: MemoryStore,
    failing: Arc<AtomicBool>,
}

impl FailingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> DbResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::QueryFailed("disk I/O error".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FailingWrites {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.check()?;
        self.inner.set(key, value).await
    }

    async fn write_batch(&self, set: &[(&str, String)], remove: &[&str]) -> DbResult<()> {
        self.check()?;
        self.inner.write_batch(set, remove).await
    }
}
