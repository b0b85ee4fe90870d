//! # Checkout Session
//!
//! Carries the frozen subtotal and the freight inputs from the cart page
//! to the checkout page through the durable store, then places the order.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──begin(cart)──► AwaitingFreight ──recalculate(q)──► Priced      │
//! │                              │                 ▲    │                   │
//! │                              │                 └────┘ (last quote wins) │
//! │                              │                      │                   │
//! │                              └── finalize ✗         └── finalize ──►    │
//! │                                  IncompleteQuote         Finalized      │
//! │                                                                         │
//! │   Abandoned: the page is closed before finalize. The persisted keys     │
//! │   stay until the next begin overwrites them.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Handoff
//! ```text
//! begin        set_many { checkoutSubtotal, freightCost = base, distanceKm = null }
//! recalculate  set_many { freightCost, distanceKm }
//! finalize     write_batch { cart ← [] ; remove checkoutSubtotal, freightCost, distanceKm }
//! ```
//!
//! A new page rebuilds the session with [`CheckoutSession::resume`] from
//! those three keys alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::validation::{validate_distance_km, validate_location_query};
use storefront_core::{
    CheckoutPhase, CheckoutState, CoreError, DistanceResolver, FreightQuote, Money,
};
use storefront_db::store::{load_json, to_json};
use storefront_db::keys;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cart_store::CartStore;
use crate::error::ShopResult;
use crate::pricing::PricingEngine;
use crate::SharedStore;

/// Label for a quote priced from a distance the customer typed in.
pub const MANUAL_DISTANCE_LABEL: &str = "Distância informada";

/// Confirmation of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: Uuid,
    pub subtotal: Money,
    pub freight_cost: Money,
    pub distance_km: f64,
    pub total: Money,
    pub finalized_at: DateTime<Utc>,
}

/// The checkout page's view of an order in progress.
pub struct CheckoutSession {
    store: SharedStore,
    engine: PricingEngine,
    resolver: DistanceResolver,
    state: Option<CheckoutState>,
    finalized: bool,
}

impl std::fmt::Debug for CheckoutSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutSession")
            .field("engine", &self.engine)
            .field("state", &self.state)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl CheckoutSession {
    /// A session with no checkout in progress.
    pub fn new(store: SharedStore, engine: PricingEngine) -> Self {
        CheckoutSession {
            store,
            engine,
            resolver: DistanceResolver::default(),
            state: None,
            finalized: false,
        }
    }

    /// Replaces the distance table.
    pub fn with_resolver(mut self, resolver: DistanceResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Rebuilds a session from the persisted checkout keys.
    ///
    /// ## Reconstruction
    /// - no usable `checkoutSubtotal` → Idle
    /// - subtotal, `distanceKm` null or unusable → AwaitingFreight
    /// - subtotal and distance → Priced
    ///
    /// A missing or unusable `freightCost` becomes the base freight cost.
    pub async fn resume(store: SharedStore, engine: PricingEngine) -> ShopResult<Self> {
        let subtotal = load_json::<Money, _>(store.as_ref(), keys::CHECKOUT_SUBTOTAL)
            .await?
            .filter(|s| !s.is_negative());

        let state = match subtotal {
            None => None,
            Some(subtotal) => {
                let freight_cost = load_json::<Money, _>(store.as_ref(), keys::FREIGHT_COST)
                    .await?
                    .filter(|c| !c.is_negative())
                    .unwrap_or_else(|| engine.base_cost());

                let distance_km = load_json::<Option<f64>, _>(store.as_ref(), keys::DISTANCE_KM)
                    .await?
                    .flatten()
                    .filter(|d| d.is_finite() && *d >= 0.0);

                Some(CheckoutState {
                    subtotal,
                    freight_cost,
                    distance_km,
                })
            }
        };

        let phase = CheckoutPhase::of(state.as_ref());
        debug!(%phase, "Checkout session resumed");

        Ok(CheckoutSession {
            store,
            engine,
            resolver: DistanceResolver::default(),
            state,
            finalized: false,
        })
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Freezes the cart total and opens the checkout.
    ///
    /// Calling it again restarts the checkout from the current cart.
    pub async fn begin(&mut self, cart: &CartStore) -> ShopResult<CheckoutState> {
        self.ensure_not_finalized()?;

        let totals = cart.totals();
        if totals.count == 0 {
            return Err(CoreError::EmptyCart.into());
        }

        let state = CheckoutState::opened(totals.amount, self.engine.base_cost());
        self.store
            .set_many(&[
                (keys::CHECKOUT_SUBTOTAL, to_json(&state.subtotal)?),
                (keys::FREIGHT_COST, to_json(&state.freight_cost)?),
                (keys::DISTANCE_KM, to_json(&state.distance_km)?),
            ])
            .await?;

        info!(
            subtotal = state.subtotal.cents(),
            items = totals.count,
            "Checkout started"
        );

        self.state = Some(state);
        Ok(state)
    }

    /// Resolves `query` to a distance and prices freight for it.
    pub async fn recalculate(&mut self, query: &str) -> ShopResult<FreightQuote> {
        self.ensure_open()?;
        let query = validate_location_query(query)?;

        let location = self.resolver.resolve(query);
        if location.is_unknown() {
            warn!(query = %query, "Location not found, using default distance");
        }

        let quote = self
            .engine
            .quote(location.distance_km, location.city_label)
            .await;
        self.apply(&quote).await?;
        Ok(quote)
    }

    /// Prices freight for a distance entered directly.
    pub async fn quote_distance(&mut self, distance_km: f64) -> ShopResult<FreightQuote> {
        self.ensure_open()?;
        let distance_km = validate_distance_km(distance_km)?;

        let quote = self.engine.quote(distance_km, MANUAL_DISTANCE_LABEL).await;
        self.apply(&quote).await?;
        Ok(quote)
    }

    /// Places the order: clears the cart and the checkout keys in one
    /// atomic write.
    ///
    /// If that write fails the session stays `Priced` and can be retried;
    /// nothing was cleared.
    pub async fn finalize(&mut self, cart: &mut CartStore) -> ShopResult<OrderReceipt> {
        let state = self.ensure_open()?;
        let Some(distance_km) = state.distance_km else {
            return Err(CoreError::IncompleteQuote.into());
        };

        let receipt = OrderReceipt {
            order_id: Uuid::new_v4(),
            subtotal: state.subtotal,
            freight_cost: state.freight_cost,
            distance_km,
            total: self.engine.total(state.subtotal, state.freight_cost),
            finalized_at: Utc::now(),
        };

        cart.clear_and_remove(&keys::CHECKOUT).await?;

        self.state = None;
        self.finalized = true;

        info!(
            order_id = %receipt.order_id,
            total = receipt.total.cents(),
            "Order finalized"
        );
        Ok(receipt)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn phase(&self) -> CheckoutPhase {
        if self.finalized {
            CheckoutPhase::Finalized
        } else {
            CheckoutPhase::of(self.state.as_ref())
        }
    }

    /// Current checkout inputs, if a checkout is open.
    pub fn state(&self) -> Option<&CheckoutState> {
        self.state.as_ref()
    }

    /// Subtotal plus current freight, if a checkout is open.
    pub fn total(&self) -> Option<Money> {
        self.state
            .as_ref()
            .map(|s| self.engine.total(s.subtotal, s.freight_cost))
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_not_finalized(&self) -> ShopResult<()> {
        if self.finalized {
            return Err(CoreError::CheckoutFinalized.into());
        }
        Ok(())
    }

    fn ensure_open(&self) -> ShopResult<CheckoutState> {
        self.ensure_not_finalized()?;
        self.state
            .ok_or_else(|| CoreError::CheckoutNotStarted.into())
    }

    async fn apply(&mut self, quote: &FreightQuote) -> ShopResult<()> {
        let mut state = self.ensure_open()?;
        state.apply_quote(quote);

        self.store
            .set_many(&[
                (keys::FREIGHT_COST, to_json(&state.freight_cost)?),
                (keys::DISTANCE_KM, to_json(&state.distance_km)?),
            ])
            .await?;

        debug!(
            distance_km = quote.distance_km,
            cost = quote.cost.cents(),
            source = %quote.pricing_source,
            label = %quote.source_label,
            "Freight quote applied"
        );

        self.state = Some(state);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
