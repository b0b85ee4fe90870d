//! # storefront-checkout: Cart, Pricing and Checkout Services
//!
//! The stateful services behind the storefront pages.
//!
//! ## Page Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Catalog page          Cart page                 Checkout page          │
//! │  ────────────          ─────────                 ─────────────          │
//! │  CatalogClient         CartStore                 CheckoutSession        │
//! │  ::fetch()             ::restore()               ::resume()             │
//! │       │                    │                          │                 │
//! │       │ add(item)          │ begin(&cart)             │ recalculate(q)  │
//! │       ▼                    ▼                          ▼                 │
//! │  ┌───────────────────────────────────────────────────────────────────┐  │
//! │  │                KeyValueStore (storefront-db)                      │  │
//! │  │   cart   checkoutSubtotal   freightCost   distanceKm              │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! │                                                       │                 │
//! │                                      PricingEngine ◄──┘                 │
//! │                                      Remote → Local                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every page load builds its services fresh from the store; nothing is
//! shared in process-global state.
//!
//! ## Module Organization
//!
//! - [`config`] - TOML + environment configuration
//! - [`cart_store`] - Persisted cart with a totals feed
//! - [`pricing`] - Freight strategies and totals
//! - [`catalog`] - Product list with offline fallback
//! - [`session`] - Checkout handoff and order placement
//! - [`error`] - Service error types

use std::sync::Arc;

pub mod cart_store;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;
pub mod session;

#[cfg(test)]
mod testing;

pub use cart_store::CartStore;
pub use catalog::{Catalog, CatalogClient, CatalogProduct, CatalogSource};
pub use config::StorefrontConfig;
pub use error::{ShopError, ShopResult};
pub use pricing::{Declined, FreightStrategy, LocalFreight, PricingEngine, RemoteFreight};
pub use session::{CheckoutSession, OrderReceipt};

/// Store handle shared by the services of one page.
pub type SharedStore = Arc<dyn storefront_db::KeyValueStore>;
