//! # Cart Store
//!
//! Owns the session's [`Cart`], mirrors every change to the durable store
//! under `cart`, and publishes fresh totals to subscribers.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add / remove / set_quantity / clear                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next = cart.clone() ← change applied, invariants enforced here         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.set("cart", next as JSON array) ── error: cart left unchanged    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart = next                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  watch::Sender<CartTotals> ── badge, cart page, checkout button         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rehydration
//! [`CartStore::restore`] never fails on bad data: a missing, malformed or
//! invariant-violating snapshot starts an empty cart.

use storefront_core::{Cart, CartTotals, Item};
use storefront_db::store::{load_json, to_json};
use storefront_db::keys;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::ShopResult;
use crate::SharedStore;

/// The session's cart plus its persistence and change feed.
pub struct CartStore {
    store: SharedStore,
    cart: Cart,
    totals_tx: watch::Sender<CartTotals>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Rehydrates the cart from the store.
    ///
    /// Only store I/O failures are errors; bad snapshots yield an empty
    /// cart.
    pub async fn restore(store: SharedStore) -> ShopResult<Self> {
        let cart = load_json::<Cart, _>(store.as_ref(), keys::CART)
            .await?
            .unwrap_or_default();

        debug!(items = cart.len(), "Cart restored");

        let (totals_tx, _) = watch::channel(cart.totals());
        Ok(CartStore {
            store,
            cart,
            totals_tx,
        })
    }

    /// Writes the current cart snapshot.
    pub async fn persist(&self) -> ShopResult<()> {
        let snapshot = to_json(&self.cart)?;
        self.store.set(keys::CART, &snapshot).await?;
        Ok(())
    }

    /// Adds one unit of `item`.
    ///
    /// An item already in the cart has its quantity incremented; its stored
    /// name and price are kept.
    pub async fn add(&mut self, item: &Item) -> ShopResult<()> {
        let mut next = self.cart.clone();
        next.add(item)?;
        self.commit(next).await?;
        debug!(item_id = item.id, "Item added to cart");
        Ok(())
    }

    /// Removes the item with `item_id`. Returns whether anything was
    /// removed; an absent id is not an error.
    pub async fn remove(&mut self, item_id: u32) -> ShopResult<bool> {
        let mut next = self.cart.clone();
        if !next.remove(item_id) {
            return Ok(false);
        }
        self.commit(next).await?;
        debug!(item_id, "Item removed from cart");
        Ok(true)
    }

    /// Adjusts the quantity of `item_id` by `delta`. Reaching zero or
    /// below removes the item. Unknown ids are ignored.
    pub async fn set_quantity(&mut self, item_id: u32, delta: i64) -> ShopResult<()> {
        let mut next = self.cart.clone();
        next.set_quantity(item_id, delta)?;
        self.commit(next).await
    }

    /// Empties the cart.
    pub async fn clear(&mut self) -> ShopResult<()> {
        self.commit(Cart::new()).await?;
        info!("Cart cleared");
        Ok(())
    }

    /// Empties the cart and removes `also_remove` in one atomic store
    /// write.
    ///
    /// On error neither the store nor this cart has changed.
    pub async fn clear_and_remove(&mut self, also_remove: &[&str]) -> ShopResult<()> {
        let next = Cart::new();
        self.store
            .write_batch(&[(keys::CART, to_json(&next)?)], also_remove)
            .await?;
        self.install(next);
        info!(removed = also_remove.len(), "Cart cleared");
        Ok(())
    }

    /// Item count and amount, computed from the current items.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        self.cart.items()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Receiver that always holds the latest totals.
    pub fn subscribe(&self) -> watch::Receiver<CartTotals> {
        self.totals_tx.subscribe()
    }

    /// Persists `next`, then makes it the current cart.
    async fn commit(&mut self, next: Cart) -> ShopResult<()> {
        self.store.set(keys::CART, &to_json(&next)?).await?;
        self.install(next);
        Ok(())
    }

    fn install(&mut self, next: Cart) {
        self.totals_tx.send_replace(next.totals());
        self.cart = next;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storefront_core::{CoreError, Money, MAX_ITEM_QUANTITY};
    use storefront_db::{KeyValueStore, MemoryStore};

    use crate::testing::FailingWrites;

    fn p50() -> Item {
        Item::new(1, "Lava-louças industrial P-50", Money::from_cents(3_000_000))
    }

    fn p80() -> Item {
        Item::new(2, "Lava-louças industrial P-80", Money::from_cents(4_500_000))
    }

    async fn fresh() -> (MemoryStore, CartStore) {
        let backing = MemoryStore::new();
        let store = CartStore::restore(Arc::new(backing.clone())).await.unwrap();
        (backing, store)
    }

    #[tokio::test]
    async fn test_restore_missing_is_empty() {
        let (_, store) = fresh().await;
        assert!(store.items().is_empty());
        assert_eq!(store.totals(), CartTotals::default());
    }

    #[tokio::test]
    async fn test_add_twice_increments() {
        let (_, mut store) = fresh().await;

        store.add(&p50()).await.unwrap();
        store.add(&p50()).await.unwrap();

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(store.totals().amount.cents(), 6_000_000);
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let (backing, mut store) = fresh().await;

        store.add(&p50()).await.unwrap();
        store.add(&p80()).await.unwrap();
        store.set_quantity(1, 2).await.unwrap();

        // Next page load sees the same cart, in the same order
        let reloaded = CartStore::restore(Arc::new(backing)).await.unwrap();
        assert_eq!(reloaded.cart(), store.cart());
        assert_eq!(reloaded.items()[0].id, 1);
        assert_eq!(reloaded.items()[0].quantity, 3);
        assert_eq!(reloaded.items()[1].id, 2);
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes() {
        let (_, mut store) = fresh().await;

        store.add(&p50()).await.unwrap();
        store.set_quantity(1, -1).await.unwrap();

        assert!(store.items().is_empty());
        assert_eq!(store.totals().count, 0);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let (_, mut store) = fresh().await;
        store.add(&p50()).await.unwrap();

        assert!(!store.remove(99).await.unwrap());
        assert!(store.remove(1).await.unwrap());
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn test_quantity_limit() {
        let (_, mut store) = fresh().await;
        store.add(&p50()).await.unwrap();

        let err = store.set_quantity(1, MAX_ITEM_QUANTITY).await.unwrap_err();
        assert!(matches!(
            err.as_core(),
            Some(CoreError::QuantityTooLarge { .. })
        ));
        // Rejected change leaves the cart untouched
        assert_eq!(store.items()[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_restores_empty() {
        let backing = MemoryStore::new();

        for snapshot in [
            "{not json",
            r#"{"id":1}"#,
            r#"[{"id":1,"name":"A","unitPrice":100,"quantity":0}]"#,
            r#"[{"id":1,"name":"A","unitPrice":-5,"quantity":1}]"#,
            r#"[{"id":1,"name":"A","unitPrice":100,"quantity":1},{"id":1,"name":"B","unitPrice":100,"quantity":1}]"#,
        ] {
            backing.set(keys::CART, snapshot).await.unwrap();
            let store = CartStore::restore(Arc::new(backing.clone())).await.unwrap();
            assert!(store.items().is_empty(), "snapshot {snapshot}");
        }
    }

    #[tokio::test]
    async fn test_clear_persists_empty_array() {
        let (backing, mut store) = fresh().await;
        store.add(&p50()).await.unwrap();

        store.clear().await.unwrap();

        assert_eq!(backing.get(keys::CART).await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cart_unchanged() {
        let backing = FailingWrites::new();
        let mut store = CartStore::restore(Arc::new(backing.clone())).await.unwrap();
        store.add(&p50()).await.unwrap();
        let mut rx = store.subscribe();

        backing.fail_writes(true);
        assert!(store.add(&p80()).await.is_err());
        assert!(store.set_quantity(1, 4).await.is_err());
        assert!(store.remove(1).await.is_err());
        assert!(store.clear().await.is_err());

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 1);
        assert!(!rx.has_changed().unwrap());

        // Memory and store still agree
        let reloaded = CartStore::restore(Arc::new(backing.clone())).await.unwrap();
        assert_eq!(reloaded.cart(), store.cart());

        backing.fail_writes(false);
        store.add(&p80()).await.unwrap();
        assert_eq!(store.items().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_and_remove_is_one_write() {
        let (backing, mut store) = fresh().await;
        store.add(&p50()).await.unwrap();
        backing.set(keys::FREIGHT_COST, "15000").await.unwrap();

        store.clear_and_remove(&[keys::FREIGHT_COST]).await.unwrap();

        assert!(store.items().is_empty());
        assert_eq!(backing.get(keys::CART).await.unwrap().as_deref(), Some("[]"));
        assert_eq!(backing.get(keys::FREIGHT_COST).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_subscribers_see_latest_totals() {
        let (_, mut store) = fresh().await;
        let mut rx = store.subscribe();
        assert_eq!(rx.borrow().count, 0);

        store.add(&p50()).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().count, 1);

        store.add(&p80()).await.unwrap();
        store.add(&p80()).await.unwrap();
        let totals = *rx.borrow_and_update();
        assert_eq!(totals.count, 3);
        assert_eq!(totals.amount.cents(), 3_000_000 + 2 * 4_500_000);
    }

    #[tokio::test]
    async fn test_totals_match_items_after_mixed_operations() {
        let (_, mut store) = fresh().await;
        let catalog = [p50(), p80(), Item::new(3, "Esteira", Money::from_cents(99_900))];

        let ops: [(usize, i64); 10] = [
            (0, 0),
            (1, 0),
            (0, 3),
            (2, 0),
            (1, -1),
            (2, 5),
            (0, -10),
            (2, 0),
            (1, 0),
            (2, -2),
        ];

        for (idx, delta) in ops {
            let item = &catalog[idx];
            if delta == 0 {
                store.add(item).await.unwrap();
            } else {
                store.set_quantity(item.id, delta).await.unwrap();
            }

            let expected: Money = store.items().iter().map(|i| i.line_total()).sum();
            assert_eq!(store.totals().amount, expected);
            assert!(store.items().iter().all(|i| i.quantity >= 1));
        }
    }
}
