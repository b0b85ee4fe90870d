//! # Key-Value Store Seam
//!
//! The storefront persists a handful of named string values. Every
//! component that touches durable state does so through
//! [`KeyValueStore`], so tests and ephemeral sessions can swap the
//! SQLite file for an in-process map.
//!
//! ## Persisted Keys
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │ Key                  │ Value (JSON text)                                │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │ cart                 │ [{"id":1,"name":"…","unitPrice":3000000,         │
//! │                      │   "quantity":2}, …]                              │
//! │ checkoutSubtotal     │ 6000000              (centavos)                  │
//! │ freightCost          │ 64500                (centavos)                  │
//! │ distanceKm           │ 198.0  or  null      (null = no quote yet)       │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! `write_batch` applies every write and every removal or none of them.
//! `set_many` and `remove_many` are batches with one side empty. The
//! checkout scalars are always written through them, and placing an order
//! empties the cart and drops the scalars in a single batch.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::DbResult;

/// Names of the persisted values.
pub mod keys {
    /// Cart snapshot.
    pub const CART: &str = "cart";
    /// Cart total captured when checkout began.
    pub const CHECKOUT_SUBTOTAL: &str = "checkoutSubtotal";
    /// Current freight charge.
    pub const FREIGHT_COST: &str = "freightCost";
    /// Distance of the last freight quote.
    pub const DISTANCE_KM: &str = "distanceKm";

    /// The checkout handoff scalars, always written and cleared together.
    pub const CHECKOUT: [&str; 3] = [CHECKOUT_SUBTOTAL, FREIGHT_COST, DISTANCE_KM];
}

/// Durable string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. Absent keys yield `Ok(None)`.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Writes a single value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Writes `set` and removes `remove` in one atomic step. Absent keys
    /// in `remove` are ignored.
    async fn write_batch(&self, set: &[(&str, String)], remove: &[&str]) -> DbResult<()>;

    /// Writes several values in one atomic step.
    async fn set_many(&self, entries: &[(&str, String)]) -> DbResult<()> {
        self.write_batch(entries, &[]).await
    }

    /// Removes several keys in one atomic step. Absent keys are ignored.
    async fn remove_many(&self, keys: &[&str]) -> DbResult<()> {
        self.write_batch(&[], keys).await
    }

    /// Removes a single key.
    async fn remove(&self, key: &str) -> DbResult<()> {
        self.remove_many(&[key]).await
    }
}

/// Reads `key` and decodes it as JSON.
///
/// A value that fails to decode is logged and treated as absent, matching
/// how a page treats stale or hand-edited storage.
pub async fn load_json<T, S>(store: &S, key: &str) -> DbResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key = %key, error = %e, "Ignoring malformed stored value");
            Ok(None)
        }
    }
}

/// Encodes `value` as JSON text for storage.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> DbResult<String> {
    Ok(serde_json::to_string(value)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn test_load_json_absent() {
        let store = MemoryStore::new();
        let value: Option<i64> = load_json(&store, keys::FREIGHT_COST).await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_load_json_malformed_is_absent() {
        let store = MemoryStore::new();
        store.set(keys::FREIGHT_COST, "not json").await.unwrap();

        let value: Option<i64> = load_json(&store, keys::FREIGHT_COST).await.unwrap();
        assert_eq!(value, None);

        // Wrong shape
        store.set(keys::FREIGHT_COST, "\"abc\"").await.unwrap();
        let value: Option<i64> = load_json(&store, keys::FREIGHT_COST).await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_null_distance_decodes_as_inner_none() {
        let store = MemoryStore::new();
        store.set(keys::DISTANCE_KM, "null").await.unwrap();

        let value: Option<Option<f64>> = load_json(&store, keys::DISTANCE_KM).await.unwrap();
        assert_eq!(value, Some(None));
    }

    #[tokio::test]
    async fn test_load_through_trait_object() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set(keys::CHECKOUT_SUBTOTAL, &to_json(&6_000_000_i64).unwrap()).await.unwrap();

        let value: Option<i64> = load_json(store.as_ref(), keys::CHECKOUT_SUBTOTAL)
            .await
            .unwrap();
        assert_eq!(value, Some(6_000_000));
    }
}
