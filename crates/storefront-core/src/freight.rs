//! # Freight Formula
//!
//! The local freight computation: a fixed minimum charge plus a linear
//! per-kilometre rate.
//!
//! ```text
//! freight(d) = 0                              d ≤ 0 or d not finite
//! freight(d) = BASE + round(d × PER_KM)       otherwise
//! ```
//!
//! A zero result means "not yet calculated", never "free shipping": the
//! checkout keeps its provisional charge until a real quote replaces it.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::{BASE_FREIGHT_COST, COST_PER_KM};

/// Rates used by the local formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightRates {
    /// Fixed minimum charge.
    pub base_cost: Money,
    /// Linear rate per kilometre.
    pub cost_per_km: Money,
}

impl FreightRates {
    pub const fn new(base_cost: Money, cost_per_km: Money) -> Self {
        FreightRates {
            base_cost,
            cost_per_km,
        }
    }

    /// Computes freight for `distance_km` with the local formula.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::freight::FreightRates;
    ///
    /// let rates = FreightRates::default();
    /// assert_eq!(rates.local_freight(198.0).cents(), 15_000 + 49_500);
    /// assert!(rates.local_freight(0.0).is_zero());
    /// assert!(rates.local_freight(f64::NAN).is_zero());
    /// ```
    ///
    /// Distances too large to price clamp at [`Money::MAX`]; the result is
    /// never negative for non-negative rates.
    pub fn local_freight(&self, distance_km: f64) -> Money {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Money::zero();
        }
        match self.cost_per_km.scale(distance_km) {
            Some(per_km) => self.base_cost.saturating_add(per_km),
            None => Money::MAX,
        }
    }
}

impl Default for FreightRates {
    fn default() -> Self {
        FreightRates::new(BASE_FREIGHT_COST, COST_PER_KM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_is_not_calculated() {
        assert_eq!(FreightRates::default().local_freight(0.0), Money::zero());
    }

    #[test]
    fn test_invalid_distances_yield_zero() {
        let rates = FreightRates::default();
        for d in [-1.0, -0.0001, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(rates.local_freight(d), Money::zero(), "distance {d}");
        }
    }

    #[test]
    fn test_linear_formula() {
        let rates = FreightRates::default();
        for km in [1_i64, 25, 198, 800, 3970] {
            let expected = BASE_FREIGHT_COST + COST_PER_KM * km;
            assert_eq!(rates.local_freight(km as f64), expected, "distance {km}");
        }
    }

    #[test]
    fn test_huge_distance_does_not_overflow() {
        let rates = FreightRates::default();
        assert_eq!(rates.local_freight(1e300), Money::MAX);
        assert_eq!(rates.local_freight(f64::MAX), Money::MAX);

        // Just under the i64 range: the base cost must not wrap the sum.
        let near_limit = (i64::MAX as f64) / 250.0 * 0.999_999;
        assert!(!rates.local_freight(near_limit).is_negative());
    }

    #[test]
    fn test_fractional_distance_rounds_to_centavo() {
        let rates = FreightRates::new(Money::from_cents(10_000), Money::from_cents(333));
        // 333 * 1.5 = 499.5 -> 500
        assert_eq!(rates.local_freight(1.5).cents(), 10_500);
    }
}
