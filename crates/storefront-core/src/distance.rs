//! # Distance Resolution
//!
//! Turns whatever the customer typed into the freight field (a postal code
//! fragment or a city name) into a distance estimate.
//!
//! ## Resolution Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  query "182"                                                            │
//! │     │                                                                   │
//! │     ▼  lowercase, then scan the table top to bottom                     │
//! │  ┌──────────────┬──────────────────────────┬────────┐                   │
//! │  │ 01000-000    │ São Paulo - SP           │   25   │  no               │
//! │  │ ...          │ ...                      │  ...   │  no               │
//! │  │ 18200-000    │ Itapetininga - SP        │  198   │  ◄── first match  │
//! │  │ ...          │ ...                      │  ...   │  (never reached)  │
//! │  └──────────────┴──────────────────────────┴────────┘                   │
//! │                                                                         │
//! │  no row matches ──► 800 km, "Localização desconhecida"                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is a priority list, not an index: nearer destinations come
//! first so a partial postal code settles on the closest plausible city.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{DEFAULT_DISTANCE_KM, UNKNOWN_LOCATION_LABEL};

/// One row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceEntry {
    /// Postal code the row answers to.
    pub match_key: &'static str,
    /// Human-readable destination.
    pub city_label: &'static str,
    /// Road distance from the warehouse.
    pub distance_km: f64,
}

/// Builds a table row in `const` context.
pub const fn entry(match_key: &'static str, city_label: &'static str, distance_km: f64) -> DistanceEntry {
    DistanceEntry {
        match_key,
        city_label,
        distance_km,
    }
}

/// Built-in reference table, nearest destinations first.
pub const REFERENCE_TABLE: &[DistanceEntry] = &[
    entry("01000-000", "São Paulo - SP", 25.0),
    entry("06000-000", "Osasco - SP", 40.0),
    entry("07000-000", "Guarulhos - SP", 45.0),
    entry("09000-000", "Santo André - SP", 50.0),
    entry("11000-000", "Santos - SP", 95.0),
    entry("13000-000", "Campinas - SP", 110.0),
    entry("18000-000", "Sorocaba - SP", 120.0),
    entry("12200-000", "São José dos Campos - SP", 125.0),
    entry("18200-000", "Itapetininga - SP", 198.0),
    entry("14000-000", "Ribeirão Preto - SP", 330.0),
    entry("80000-000", "Curitiba - PR", 410.0),
    entry("20000-000", "Rio de Janeiro - RJ", 430.0),
    entry("30000-000", "Belo Horizonte - MG", 590.0),
    entry("70000-000", "Brasília - DF", 1010.0),
    entry("90000-000", "Porto Alegre - RS", 1130.0),
    entry("40000-000", "Salvador - BA", 1960.0),
    entry("50000-000", "Recife - PE", 2660.0),
    entry("60000-000", "Fortaleza - CE", 3120.0),
    entry("69000-000", "Manaus - AM", 3970.0),
];

/// A resolved destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Location {
    pub distance_km: f64,
    pub city_label: String,
}

impl Location {
    /// The fallback for queries that match nothing.
    pub fn unknown() -> Self {
        Location {
            distance_km: DEFAULT_DISTANCE_KM,
            city_label: UNKNOWN_LOCATION_LABEL.to_string(),
        }
    }

    /// True when this is the unknown-location fallback.
    pub fn is_unknown(&self) -> bool {
        self.city_label == UNKNOWN_LOCATION_LABEL
    }
}

/// Table-driven location resolver.
#[derive(Debug, Clone, Copy)]
pub struct DistanceResolver {
    table: &'static [DistanceEntry],
}

impl DistanceResolver {
    /// Creates a resolver over a caller-provided priority table.
    pub const fn with_table(table: &'static [DistanceEntry]) -> Self {
        DistanceResolver { table }
    }

    /// Resolves `query` to a distance. Never fails.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::distance::DistanceResolver;
    ///
    /// let resolver = DistanceResolver::default();
    /// assert_eq!(resolver.resolve("campinas").distance_km, 110.0);
    /// assert_eq!(resolver.resolve("Xique-Xique").distance_km, 800.0);
    /// ```
    pub fn resolve(&self, query: &str) -> Location {
        let needle = query.trim().to_lowercase();

        self.table
            .iter()
            .find(|row| {
                row.match_key.to_lowercase().contains(&needle)
                    || row.city_label.to_lowercase().contains(&needle)
            })
            .map(|row| Location {
                distance_km: row.distance_km,
                city_label: row.city_label.to_string(),
            })
            .unwrap_or_else(Location::unknown)
    }
}

impl Default for DistanceResolver {
    fn default() -> Self {
        DistanceResolver::with_table(REFERENCE_TABLE)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_postal_code() {
        let location = DistanceResolver::default().resolve("18200-000");
        assert_eq!(location.distance_km, 198.0);
        assert_eq!(location.city_label, "Itapetininga - SP");
    }

    #[test]
    fn test_partial_postal_code_takes_nearest_row() {
        // "182" is not in any earlier key; Sorocaba's "18000-000" must not win
        assert_eq!(DistanceResolver::default().resolve("182").distance_km, 198.0);
        // "000-000" appears in every key; the first row wins
        assert_eq!(
            DistanceResolver::default().resolve("000-000").city_label,
            "São Paulo - SP"
        );
    }

    #[test]
    fn test_city_name_is_case_insensitive() {
        let resolver = DistanceResolver::default();
        assert_eq!(resolver.resolve("CAMPINAS").distance_km, 110.0);
        assert_eq!(resolver.resolve("são paulo").distance_km, 25.0);
        assert_eq!(resolver.resolve("SÃO JOSÉ").distance_km, 125.0);
        assert_eq!(resolver.resolve("  curitiba ").distance_km, 410.0);
    }

    #[test]
    fn test_unmatched_query_returns_default() {
        let location = DistanceResolver::default().resolve("Atlântida");
        assert_eq!(location.distance_km, 800.0);
        assert_eq!(location.city_label, UNKNOWN_LOCATION_LABEL);
        assert!(location.is_unknown());
    }

    #[test]
    fn test_resolver_is_total() {
        let resolver = DistanceResolver::default();
        let long = "x".repeat(10_000);
        for query in ["", " ", "ab", "🚚🚚🚚", "99999-999", "\u{0}", long.as_str()] {
            let location = resolver.resolve(query);
            assert!(location.distance_km > 0.0);
        }
    }

    #[test]
    fn test_custom_table() {
        const TABLE: &[DistanceEntry] = &[entry("99999-999", "Depósito", 5.0)];
        let resolver = DistanceResolver::with_table(TABLE);
        assert_eq!(resolver.resolve("99999").distance_km, 5.0);
        assert!(resolver.resolve("01000-000").is_unknown());
    }
}
