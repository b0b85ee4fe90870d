//! # storefront-core: Pure Business Logic for the Storefront
//!
//! Everything that decides what a customer pays lives here as plain
//! functions and value types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (storefront CLI / pages)              │   │
//! │  │     Catalog ──► Cart ──► Checkout (freight) ──► Confirmation    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     storefront-checkout (CartStore, PricingEngine, Session)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  money  │ │  cart   │ │ distance │ │ freight │ │validate│  │   │
//! │  │   │  Money  │ │  Cart   │ │ Resolver │ │ Rates   │ │ rules  │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, FreightQuote, CheckoutState, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Ordered cart with the one-entry-per-id invariant
//! - [`distance`] - Free-text location to distance resolution
//! - [`freight`] - Local freight formula
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for queries and distances
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::distance::DistanceResolver;
//! use storefront_core::freight::FreightRates;
//!
//! let location = DistanceResolver::default().resolve("18200-000");
//! assert_eq!(location.distance_km, 198.0);
//!
//! let freight = FreightRates::default().local_freight(location.distance_km);
//! assert_eq!(freight.cents(), 15_000 + 198 * 250);
//! ```

pub mod cart;
pub mod distance;
pub mod error;
pub mod freight;
pub mod money;
pub mod types;
pub mod validation;

pub use cart::Cart;
pub use distance::{DistanceResolver, Location};
pub use error::{CoreError, CoreResult, ValidationError};
pub use freight::FreightRates;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct items in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in the cart.
///
/// Guards against typing 1000 instead of 10 on an appliance order.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price a cart accepts (R$ 100.000.000,00).
///
/// With the item and quantity limits this keeps cart totals well inside
/// `i64` centavos.
pub const MAX_UNIT_PRICE: Money = Money::from_cents(10_000_000_000);

/// Fixed minimum freight charge (R$ 150,00).
pub const BASE_FREIGHT_COST: Money = Money::from_cents(15_000);

/// Linear freight rate per kilometre (R$ 2,50).
pub const COST_PER_KM: Money = Money::from_cents(250);

/// Longest distance accepted for pricing, about half the Earth's
/// circumference.
pub const MAX_DISTANCE_KM: f64 = 20_000.0;

/// Highest freight a pricing service may quote (R$ 1.000.000,00).
pub const MAX_FREIGHT_COST: Money = Money::from_cents(100_000_000);

/// Distance assumed when a location query matches nothing in the table.
pub const DEFAULT_DISTANCE_KM: f64 = 800.0;

/// Label reported alongside [`DEFAULT_DISTANCE_KM`].
pub const UNKNOWN_LOCATION_LABEL: &str = "Localização desconhecida";

/// Shortest location query the resolver will be asked about.
pub const MIN_LOCATION_QUERY_LEN: usize = 3;
