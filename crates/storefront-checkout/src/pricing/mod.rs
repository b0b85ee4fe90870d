//! # Pricing Engine
//!
//! Subtotal, freight and grand total for a checkout.
//!
//! ## Strategy Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote(distance_km)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────┐  Declined   ┌──────────────────┐  Declined        │
//! │  │ RemoteFreight    │────────────►│ LocalFreight     │─────────┐        │
//! │  │ (if configured)  │             │                  │         │        │
//! │  └────────┬─────────┘             └────────┬─────────┘         ▼        │
//! │           │ Ok(cost)                       │ Ok(cost)   local formula   │
//! │           ▼                                ▼                            │
//! │     FreightQuote { pricing_source: Remote | Local }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Strategies are tried in order. A decline moves on to the next one; if
//! every strategy declines, the local formula prices the order. Callers
//! therefore always get a cost and only learn about a degraded remote
//! through `PricingSource::Local`.

mod local;
mod remote;

pub use local::LocalFreight;
pub use remote::RemoteFreight;

use async_trait::async_trait;
use std::fmt;
use storefront_core::{FreightQuote, FreightRates, Money, PricingSource};
use tracing::{debug, warn};

use crate::config::StorefrontConfig;
use crate::error::ShopResult;

// =============================================================================
// Strategy Seam
// =============================================================================

/// A strategy's explicit refusal to price, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declined {
    pub reason: String,
}

impl Declined {
    pub fn new(reason: impl Into<String>) -> Self {
        Declined {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Declined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// One way of pricing freight for a distance.
#[async_trait]
pub trait FreightStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Reported to the UI when this strategy produced the cost.
    fn source(&self) -> PricingSource;

    /// Prices `distance_km`, or declines.
    async fn price(&self, distance_km: f64) -> Result<Money, Declined>;
}

/// Boxed strategy for the engine's chain.
pub type BoxedFreightStrategy = Box<dyn FreightStrategy>;

// =============================================================================
// PricingEngine
// =============================================================================

/// Computes freight and totals.
pub struct PricingEngine {
    rates: FreightRates,
    strategies: Vec<BoxedFreightStrategy>,
}

impl fmt::Debug for PricingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("PricingEngine")
            .field("rates", &self.rates)
            .field("strategies", &names)
            .finish()
    }
}

impl PricingEngine {
    /// Engine that prices with the local formula only.
    pub fn local(rates: FreightRates) -> Self {
        PricingEngine {
            rates,
            strategies: vec![Box::new(LocalFreight::new(rates))],
        }
    }

    /// Engine with an explicit strategy chain.
    ///
    /// The local formula still applies when every strategy declines.
    pub fn with_strategies(rates: FreightRates, strategies: Vec<BoxedFreightStrategy>) -> Self {
        PricingEngine { rates, strategies }
    }

    /// Builds the default chain from configuration:
    /// `[RemoteFreight (if configured), LocalFreight]`.
    pub fn from_config(config: &StorefrontConfig) -> ShopResult<Self> {
        let rates = config.freight_rates();
        let mut strategies: Vec<BoxedFreightStrategy> = Vec::with_capacity(2);

        if let Some(endpoint) = config.pricing_url()? {
            debug!(endpoint = %endpoint, "Remote freight pricing enabled");
            strategies.push(Box::new(RemoteFreight::new(
                endpoint,
                config.request_timeout(),
            )?));
        }
        strategies.push(Box::new(LocalFreight::new(rates)));

        Ok(PricingEngine::with_strategies(rates, strategies))
    }

    pub fn rates(&self) -> FreightRates {
        self.rates
    }

    /// Provisional freight shown before any quote.
    pub fn base_cost(&self) -> Money {
        self.rates.base_cost
    }

    /// Freight from the local formula. Zero means "not yet calculated".
    pub fn local_freight(&self, distance_km: f64) -> Money {
        self.rates.local_freight(distance_km)
    }

    /// Freight from the remote service, falling back to the local formula
    /// on any failure.
    pub async fn remote_freight(&self, distance_km: f64) -> Money {
        self.price(distance_km).await.0
    }

    /// Runs the strategy chain for `distance_km`.
    pub async fn price(&self, distance_km: f64) -> (Money, PricingSource) {
        for strategy in &self.strategies {
            match strategy.price(distance_km).await {
                Ok(cost) => {
                    debug!(
                        strategy = strategy.name(),
                        distance_km,
                        cost = cost.cents(),
                        "Freight priced"
                    );
                    return (cost, strategy.source());
                }
                Err(declined) => {
                    warn!(
                        strategy = strategy.name(),
                        reason = %declined,
                        "Freight strategy declined, trying next"
                    );
                }
            }
        }

        (self.local_freight(distance_km), PricingSource::Local)
    }

    /// Prices `distance_km` and packages the result for display.
    pub async fn quote(&self, distance_km: f64, source_label: impl Into<String>) -> FreightQuote {
        let (cost, pricing_source) = self.price(distance_km).await;
        FreightQuote {
            distance_km,
            cost,
            source_label: source_label.into(),
            pricing_source,
        }
    }

    /// Grand total, clamped at [`Money::MAX`].
    pub fn total(&self, subtotal: Money, freight_cost: Money) -> Money {
        subtotal.saturating_add(freight_cost)
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        PricingEngine::local(FreightRates::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct AlwaysDecline {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl FreightStrategy for AlwaysDecline {
        fn name(&self) -> &'static str {
            "decline"
        }

        fn source(&self) -> PricingSource {
            PricingSource::Remote
        }

        async fn price(&self, _distance_km: f64) -> Result<Money, Declined> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Declined::new("service unavailable"))
        }
    }

    struct Flat(Money);

    #[async_trait]
    impl FreightStrategy for Flat {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn source(&self) -> PricingSource {
            PricingSource::Remote
        }

        async fn price(&self, _distance_km: f64) -> Result<Money, Declined> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn test_local_engine() {
        let engine = PricingEngine::default();

        let (cost, source) = engine.price(198.0).await;
        assert_eq!(cost.cents(), 15_000 + 198 * 250);
        assert_eq!(source, PricingSource::Local);
    }

    #[tokio::test]
    async fn test_decline_falls_through_to_next() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rates = FreightRates::default();
        let engine = PricingEngine::with_strategies(
            rates,
            vec![
                Box::new(AlwaysDecline {
                    calls: calls.clone(),
                }),
                Box::new(LocalFreight::new(rates)),
            ],
        );

        let quote = engine.quote(198.0, "Itapetininga").await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(quote.cost, engine.local_freight(198.0));
        assert_eq!(quote.pricing_source, PricingSource::Local);
        assert_eq!(quote.source_label, "Itapetininga");
        assert_eq!(quote.distance_km, 198.0);
    }

    #[tokio::test]
    async fn test_all_declined_uses_local_formula() {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = PricingEngine::with_strategies(
            FreightRates::default(),
            vec![Box::new(AlwaysDecline { calls })],
        );

        assert_eq!(engine.remote_freight(10.0).await.cents(), 15_000 + 2_500);
    }

    #[tokio::test]
    async fn test_first_accepting_strategy_wins() {
        let engine = PricingEngine::with_strategies(
            FreightRates::default(),
            vec![
                Box::new(Flat(Money::from_cents(4_200))),
                Box::new(LocalFreight::default()),
            ],
        );

        let (cost, source) = engine.price(198.0).await;
        assert_eq!(cost.cents(), 4_200);
        assert_eq!(source, PricingSource::Remote);
    }

    #[test]
    fn test_total_and_local_freight() {
        let engine = PricingEngine::default();
        let subtotal = Money::from_cents(6_000_000);

        assert_eq!(engine.local_freight(0.0), Money::zero());
        assert_eq!(engine.local_freight(-5.0), Money::zero());
        assert_eq!(
            engine.total(subtotal, Money::from_cents(64_500)).cents(),
            6_064_500
        );
        assert_eq!(engine.base_cost().cents(), 15_000);
    }

    #[test]
    fn test_from_config_without_remote() {
        let engine = PricingEngine::from_config(&StorefrontConfig::default()).unwrap();
        assert_eq!(format!("{:?}", engine).matches("local").count(), 1);
        assert!(!format!("{:?}", engine).contains("remote"));
    }

    #[test]
    fn test_from_config_with_remote() {
        let mut config = StorefrontConfig::default();
        config.pricing.service_url = Some("http://127.0.0.1:9/frete".to_string());

        let engine = PricingEngine::from_config(&config).unwrap();
        let debug = format!("{:?}", engine);
        assert!(debug.contains("[\"remote\", \"local\"]"));
    }
}
