//! # Domain Types
//!
//! Value types shared by the cart, pricing and checkout layers.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │  FreightQuote   │   │  CheckoutState  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (catalog)   │   │  distance_km    │   │  subtotal       │       │
//! │  │  name           │   │  cost           │   │  freight_cost   │       │
//! │  │  unit_price     │   │  source_label   │   │  distance_km?   │       │
//! │  │  quantity ≥ 1   │   │  pricing_source │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CartTotals    │   │  PricingSource  │   │  CheckoutPhase  │       │
//! │  │  count, amount  │   │  Remote / Local │   │  Idle ... Final │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase because the persisted snapshots and
//! the storefront pages share them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A selected catalog item and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    /// Catalog identifier (externally assigned, unique within a cart).
    pub id: u32,

    /// Display name at the time the item was added.
    pub name: String,

    /// Price per unit, frozen when the item entered the cart.
    pub unit_price: Money,

    /// Units in the cart, always ≥ 1.
    pub quantity: i64,
}

impl Item {
    /// Creates an item with quantity 1.
    pub fn new(id: u32, name: impl Into<String>, unit_price: Money) -> Self {
        Item {
            id,
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart summary for display: units and amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Sum of quantities.
    pub count: i64,

    /// Sum of unit price × quantity.
    pub amount: Money,
}

// =============================================================================
// Freight
// =============================================================================

/// Which strategy produced a freight cost.
///
/// `Local` after a configured remote service means the service was
/// unavailable; the UI shows that as a notice, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PricingSource {
    /// Quoted by the remote pricing service.
    Remote,
    /// Computed with the local formula.
    Local,
}

impl std::fmt::Display for PricingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingSource::Remote => write!(f, "remote"),
            PricingSource::Local => write!(f, "local"),
        }
    }
}

/// A priced freight estimate for one destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FreightQuote {
    /// Estimated distance from the warehouse.
    pub distance_km: f64,

    /// Freight charge.
    pub cost: Money,

    /// Resolved location description.
    pub source_label: String,

    /// Strategy that produced `cost`.
    pub pricing_source: PricingSource,
}

// =============================================================================
// Checkout State
// =============================================================================

/// Frozen pricing inputs carried from the cart page to the checkout page.
///
/// ## Lifecycle
/// ```text
/// begin()        → { subtotal, freight_cost: BASE, distance_km: None }
/// recalculate()  → { subtotal, freight_cost: quote, distance_km: Some(d) }
/// finalize()     → deleted
/// ```
///
/// `distance_km == None` is the explicit "no quote yet" marker; a quote for
/// a zero-distance location is `Some(0.0)` and is still a quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutState {
    /// Cart amount at the moment the customer left the cart.
    pub subtotal: Money,

    /// Current freight charge (base charge until a quote exists).
    pub freight_cost: Money,

    /// Distance of the last quote, if any.
    pub distance_km: Option<f64>,
}

impl CheckoutState {
    /// Opens a checkout for `subtotal` with the provisional freight charge.
    pub fn opened(subtotal: Money, provisional_freight: Money) -> Self {
        CheckoutState {
            subtotal,
            freight_cost: provisional_freight,
            distance_km: None,
        }
    }

    /// True once a freight quote has been applied.
    #[inline]
    pub fn has_quote(&self) -> bool {
        self.distance_km.is_some()
    }

    /// Replaces the freight inputs with `quote` (last quote wins).
    pub fn apply_quote(&mut self, quote: &FreightQuote) {
        self.freight_cost = quote.cost;
        self.distance_km = Some(quote.distance_km);
    }

    /// Subtotal plus current freight, clamped at [`Money::MAX`].
    #[inline]
    pub fn total(&self) -> Money {
        self.subtotal.saturating_add(self.freight_cost)
    }
}

/// Where a checkout is in its lifecycle.
///
/// ```text
/// Idle ──begin──► AwaitingFreight ──recalculate──► Priced ──finalize──► Finalized
///                                                    ▲  │
///                                                    └──┘ recalculate
/// ```
/// Abandoned is implicit: a checkout that never reaches Finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutPhase {
    /// No checkout inputs exist.
    Idle,
    /// Subtotal frozen, waiting for the customer to request a freight quote.
    AwaitingFreight,
    /// A freight quote exists; the order can be finalized.
    Priced,
    /// Order placed. Terminal.
    Finalized,
}

impl CheckoutPhase {
    /// Derives the phase from persisted checkout inputs.
    pub fn of(state: Option<&CheckoutState>) -> Self {
        match state {
            None => CheckoutPhase::Idle,
            Some(s) if s.has_quote() => CheckoutPhase::Priced,
            Some(_) => CheckoutPhase::AwaitingFreight,
        }
    }
}

impl std::fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutPhase::Idle => write!(f, "idle"),
            CheckoutPhase::AwaitingFreight => write!(f, "awaiting_freight"),
            CheckoutPhase::Priced => write!(f, "priced"),
            CheckoutPhase::Finalized => write!(f, "finalized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(distance_km: f64, cost_cents: i64) -> FreightQuote {
        FreightQuote {
            distance_km,
            cost: Money::from_cents(cost_cents),
            source_label: "Test".to_string(),
            pricing_source: PricingSource::Local,
        }
    }

    #[test]
    fn test_item_line_total() {
        let mut item = Item::new(1, "Lava-louças industrial P-50", Money::from_cents(3_000_000));
        assert_eq!(item.quantity, 1);
        item.quantity = 2;
        assert_eq!(item.line_total().cents(), 6_000_000);
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item::new(7, "Modelo", Money::from_cents(100));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["unitPrice"], 100);
        assert_eq!(json["quantity"], 1);
    }

    #[test]
    fn test_checkout_state_phases() {
        assert_eq!(CheckoutPhase::of(None), CheckoutPhase::Idle);

        let mut state = CheckoutState::opened(Money::from_cents(6_000_000), Money::from_cents(15_000));
        assert!(!state.has_quote());
        assert_eq!(CheckoutPhase::of(Some(&state)), CheckoutPhase::AwaitingFreight);

        state.apply_quote(&quote(198.0, 64_500));
        assert_eq!(CheckoutPhase::of(Some(&state)), CheckoutPhase::Priced);
        assert_eq!(state.total().cents(), 6_064_500);
    }

    #[test]
    fn test_zero_distance_quote_still_counts() {
        let mut state = CheckoutState::opened(Money::from_cents(100), Money::from_cents(15_000));
        state.apply_quote(&quote(0.0, 0));
        assert!(state.has_quote());
        assert_eq!(state.distance_km, Some(0.0));
    }

    #[test]
    fn test_total_does_not_wrap() {
        let mut state = CheckoutState::opened(Money::from_cents(6_000_000), Money::from_cents(15_000));
        state.apply_quote(&quote(198.0, i64::MAX));
        assert_eq!(state.total(), Money::MAX);
    }

    #[test]
    fn test_last_quote_wins() {
        let mut state = CheckoutState::opened(Money::from_cents(100), Money::from_cents(15_000));
        state.apply_quote(&quote(198.0, 64_500));
        state.apply_quote(&quote(25.0, 21_250));
        assert_eq!(state.distance_km, Some(25.0));
        assert_eq!(state.freight_cost.cents(), 21_250);
    }
}
