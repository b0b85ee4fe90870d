//! Local freight formula as a strategy.

use async_trait::async_trait;
use storefront_core::{FreightRates, Money, PricingSource};

use super::{Declined, FreightStrategy};

/// Prices freight with `base + distance × per_km`. Never declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFreight {
    rates: FreightRates,
}

impl LocalFreight {
    pub fn new(rates: FreightRates) -> Self {
        LocalFreight { rates }
    }
}

#[async_trait]
impl FreightStrategy for LocalFreight {
    fn name(&self) -> &'static str {
        "local"
    }

    fn source(&self) -> PricingSource {
        PricingSource::Local
    }

    async fn price(&self, distance_km: f64) -> Result<Money, Declined> {
        Ok(self.rates.local_freight(distance_km))
    }
}
