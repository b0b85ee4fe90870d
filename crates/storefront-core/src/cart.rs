//! # Cart
//!
//! The ordered list of selected items, with the cart invariants enforced on
//! every mutation and on every snapshot that is deserialized.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation              Effect                                          │
//! │  ─────────              ──────                                          │
//! │  add(item)              same id? quantity += 1 : push(quantity = 1)     │
//! │  remove(id)             drop matching item (absent id is a no-op)       │
//! │  set_quantity(id, Δ)    quantity += Δ; ≤ 0 removes the item             │
//! │  clear()                drop everything                                 │
//! │  totals()               recomputed from items on every call             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one item per `id`
//! - Every quantity is in `1..=MAX_ITEM_QUANTITY`
//! - Insertion order is display order
//!
//! The persisted snapshot is the bare JSON array of items. Deserializing a
//! snapshot that breaks an invariant fails, so a corrupted store can never
//! produce an invalid cart.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartTotals, Item};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Item>", into = "Vec<Item>")]
pub struct Cart {
    items: Vec<Item>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of `item`.
    ///
    /// ## Behavior
    /// - Item already in cart: quantity increases by 1
    /// - Item not in cart: appended with quantity 1 (the incoming
    ///   quantity is ignored)
    pub fn add(&mut self, item: &Item) -> CoreResult<()> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let requested = existing.quantity + 1;
            if requested > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = requested;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        if item.unit_price > MAX_UNIT_PRICE {
            return Err(CoreError::PriceTooLarge {
                price: item.unit_price,
                max: MAX_UNIT_PRICE,
            });
        }

        self.items.push(Item {
            quantity: 1,
            ..item.clone()
        });
        Ok(())
    }

    /// Removes the item with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: u32) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != initial_len
    }

    /// Adds `delta` to the quantity of the item with `id`.
    ///
    /// A resulting quantity ≤ 0 removes the item. Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: u32, delta: i64) -> CoreResult<()> {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Ok(());
        };

        let requested = item.quantity.saturating_add(delta);
        if requested <= 0 {
            self.remove(id);
            return Ok(());
        }
        if requested > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested,
                max: MAX_ITEM_QUANTITY,
            });
        }

        item.quantity = requested;
        Ok(())
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Units and amount, recomputed from the items.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            count: self.items.iter().map(|i| i.quantity).sum(),
            amount: self.items.iter().map(Item::line_total).sum::<Money>(),
        }
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Looks up an item by id.
    pub fn get(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Rebuilds a cart from a snapshot, rejecting anything that breaks the
/// cart invariants.
impl TryFrom<Vec<Item>> for Cart {
    type Error = CoreError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        if items.len() > MAX_CART_ITEMS {
            return Err(CoreError::InvalidSnapshot(format!(
                "{} items exceeds the limit of {}",
                items.len(),
                MAX_CART_ITEMS
            )));
        }

        for (index, item) in items.iter().enumerate() {
            if !(1..=MAX_ITEM_QUANTITY).contains(&item.quantity) {
                return Err(CoreError::InvalidSnapshot(format!(
                    "item {} has quantity {}",
                    item.id, item.quantity
                )));
            }
            if item.unit_price.is_negative() || item.unit_price > MAX_UNIT_PRICE {
                return Err(CoreError::InvalidSnapshot(format!(
                    "item {} has price {}",
                    item.id, item.unit_price
                )));
            }
            if items[..index].iter().any(|earlier| earlier.id == item.id) {
                return Err(CoreError::InvalidSnapshot(format!(
                    "item {} appears more than once",
                    item.id
                )));
            }
        }

        Ok(Cart { items })
    }
}

impl From<Cart> for Vec<Item> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p50() -> Item {
        Item::new(1, "Lava-louças industrial P-50", Money::from_cents(3_000_000))
    }

    fn m100() -> Item {
        Item::new(2, "Lava-louças industrial M-100", Money::from_cents(1_520_000))
    }

    fn assert_invariants(cart: &Cart) {
        let expected: i64 = cart
            .items()
            .iter()
            .map(|i| i.unit_price.cents() * i.quantity)
            .sum();
        assert_eq!(cart.totals().amount.cents(), expected);
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_add_same_item_twice_increments_quantity() {
        let mut cart = Cart::new();
        cart.add(&p50()).unwrap();
        cart.add(&p50()).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(1).unwrap().quantity, 2);
        assert_eq!(cart.totals().count, 2);
        assert_eq!(cart.totals().amount.cents(), 6_000_000);
    }

    #[test]
    fn test_add_ignores_incoming_quantity() {
        let mut cart = Cart::new();
        let mut item = p50();
        item.quantity = 40;
        cart.add(&item).unwrap();
        assert_eq!(cart.get(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut cart = Cart::new();
        cart.add(&m100()).unwrap();
        cart.add(&p50()).unwrap();
        cart.add(&m100()).unwrap();

        let ids: Vec<u32> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&p50()).unwrap();
        assert!(!cart.remove(99));
        assert_eq!(cart.len(), 1);
        assert!(cart.remove(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_to_zero_or_below_removes() {
        let mut cart = Cart::new();
        cart.add(&p50()).unwrap();
        cart.add(&p50()).unwrap();

        cart.set_quantity(1, -1).unwrap();
        assert_eq!(cart.get(1).unwrap().quantity, 1);

        cart.set_quantity(1, -5).unwrap();
        assert!(cart.get(1).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&p50()).unwrap();
        cart.set_quantity(42, 3).unwrap();
        assert_eq!(cart.totals().count, 1);
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        cart.add(&p50()).unwrap();
        let err = cart.set_quantity(1, MAX_ITEM_QUANTITY).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        // Failed update leaves the item untouched
        assert_eq!(cart.get(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_cart_item_limit() {
        let mut cart = Cart::new();
        for id in 0..MAX_CART_ITEMS as u32 {
            cart.add(&Item::new(id, "x", Money::from_cents(1))).unwrap();
        }
        let err = cart.add(&Item::new(9999, "x", Money::from_cents(1))).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }

    #[test]
    fn test_unit_price_limit() {
        let mut cart = Cart::new();
        cart.add(&Item::new(1, "x", MAX_UNIT_PRICE)).unwrap();
        let err = cart
            .add(&Item::new(2, "y", Money::from_cents(MAX_UNIT_PRICE.cents() + 1)))
            .unwrap_err();
        assert!(matches!(err, CoreError::PriceTooLarge { .. }));
        assert_eq!(cart.len(), 1);

        // Worst case cart still totals without overflow
        cart.set_quantity(1, MAX_ITEM_QUANTITY - 1).unwrap();
        assert_eq!(
            cart.totals().amount.cents(),
            MAX_UNIT_PRICE.cents() * MAX_ITEM_QUANTITY
        );
    }

    #[test]
    fn test_totals_hold_across_mixed_operations() {
        let mut cart = Cart::new();
        let ops: [(u8, u32, i64); 12] = [
            (0, 1, 0),
            (0, 2, 0),
            (0, 1, 0),
            (2, 2, 4),
            (2, 1, -1),
            (1, 3, 0),
            (2, 2, -2),
            (0, 3, 0),
            (2, 3, -10),
            (0, 2, 0),
            (1, 1, 0),
            (2, 2, 1),
        ];
        let items = [p50(), m100(), Item::new(3, "Cesto", Money::from_cents(12_990))];

        for (op, id, delta) in ops {
            match op {
                0 => cart.add(&items[(id - 1) as usize]).unwrap(),
                1 => {
                    cart.remove(id);
                }
                _ => cart.set_quantity(id, delta).unwrap(),
            }
            assert_invariants(&cart);
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(2).unwrap().quantity, 5);
    }

    #[test]
    fn test_snapshot_round_trip_preserves_order() {
        let mut cart = Cart::new();
        cart.add(&m100()).unwrap();
        cart.add(&p50()).unwrap();
        cart.add(&p50()).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_snapshot_rejects_invariant_violations() {
        let duplicate = r#"[{"id":1,"name":"a","unitPrice":1,"quantity":1},
                           {"id":1,"name":"a","unitPrice":1,"quantity":2}]"#;
        assert!(serde_json::from_str::<Cart>(duplicate).is_err());

        let zero_qty = r#"[{"id":1,"name":"a","unitPrice":1,"quantity":0}]"#;
        assert!(serde_json::from_str::<Cart>(zero_qty).is_err());

        let negative_price = r#"[{"id":1,"name":"a","unitPrice":-5,"quantity":1}]"#;
        assert!(serde_json::from_str::<Cart>(negative_price).is_err());

        let huge_price = format!(
            r#"[{{"id":1,"name":"a","unitPrice":{},"quantity":999}}]"#,
            i64::MAX
        );
        assert!(serde_json::from_str::<Cart>(&huge_price).is_err());

        assert!(serde_json::from_str::<Cart>("{\"cart\":true}").is_err());
    }
}
