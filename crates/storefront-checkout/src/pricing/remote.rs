//! # Remote Freight Pricing
//!
//! Asks the pricing service for a freight cost.
//!
//! ## Wire Format
//! ```text
//! GET {endpoint}?distanceKm=198
//!
//! 200 OK
//! {"cost": 644.99}          ← reais, converted to centavos here
//! ```
//!
//! Anything else (transport error, non-2xx status, missing or non-numeric
//! `cost`, negative or non-finite cost, cost above `MAX_FREIGHT_COST`) is a
//! decline.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use storefront_core::{Money, PricingSource, MAX_FREIGHT_COST};
use tracing::{debug, instrument};
use url::Url;

use super::{Declined, FreightStrategy};
use crate::error::ShopResult;

#[derive(Debug, Deserialize)]
struct RemoteQuote {
    cost: f64,
}

/// Freight strategy backed by the remote pricing service.
#[derive(Debug, Clone)]
pub struct RemoteFreight {
    client: reqwest::Client,
    endpoint: Url,
}

impl RemoteFreight {
    /// Creates a client for `endpoint`. `timeout` of `None` waits
    /// indefinitely.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> ShopResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(RemoteFreight {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl FreightStrategy for RemoteFreight {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn source(&self) -> PricingSource {
        PricingSource::Remote
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn price(&self, distance_km: f64) -> Result<Money, Declined> {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(Declined::new("no distance to price"));
        }

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("distanceKm", distance_km)])
            .send()
            .await
            .map_err(|e| Declined::new(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Declined::new(format!("service returned {status}")));
        }

        let body: RemoteQuote = response
            .json()
            .await
            .map_err(|e| Declined::new(format!("malformed response: {e}")))?;

        if body.cost < 0.0 {
            return Err(Declined::new(format!("negative cost {}", body.cost)));
        }
        let cost = Money::from_decimal(body.cost)
            .ok_or_else(|| Declined::new(format!("unusable cost {}", body.cost)))?;
        if cost > MAX_FREIGHT_COST {
            return Err(Declined::new(format!(
                "cost {cost} exceeds the limit of {MAX_FREIGHT_COST}"
            )));
        }

        debug!(cost = cost.cents(), "Remote freight quote received");
        Ok(cost)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
