//! # Key-Value Repository
//!
//! The SQLite implementation of [`KeyValueStore`].
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  write_batch(set: [(cart, "[]")], remove: [checkoutSubtotal, …])        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SINGLE TRANSACTION                            │   │
//! │  │  INSERT … ON CONFLICT(key) DO UPDATE   (× set)                  │   │
//! │  │  DELETE FROM key_value WHERE key = ?   (× remove)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ← every entry or none                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::KeyValueStore;

const UPSERT_SQL: &str = r#"
    INSERT INTO key_value (key, value, updated_at)
    VALUES (?1, ?2, datetime('now'))
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

/// Repository for the `key_value` table.
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    /// Creates a new KeyValueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }

    /// Lists stored keys in alphabetical order.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM key_value ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

#[async_trait]
impl KeyValueStore for KeyValueRepository {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM key_value WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing value");

        sqlx::query(UPSERT_SQL)
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn write_batch(&self, set: &[(&str, String)], remove: &[&str]) -> DbResult<()> {
        debug!(
            writes = set.len(),
            removals = remove.len(),
            "Writing batch atomically"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for (key, value) in set {
            sqlx::query(UPSERT_SQL)
                .bind(*key)
                .bind(value.as_str())
                .execute(&mut *tx)
                .await?;
        }

        for key in remove {
            sqlx::query("DELETE FROM key_value WHERE key = ?1")
                .bind(*key)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
