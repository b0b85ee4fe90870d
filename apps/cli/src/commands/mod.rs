//! # CLI Commands
//!
//! ```text
//! commands/
//! ├── mod.rs       ◄─── Page: config + store opened for one invocation
//! ├── catalog.rs   ◄─── Product listing
//! ├── cart.rs      ◄─── Cart manipulation
//! └── checkout.rs  ◄─── Checkout steps
//! ```
//!
//! Each command builds the services it needs from the [`Page`] and prints
//! its result. Services never outlive the invocation.

use std::path::PathBuf;
use std::sync::Arc;

use storefront_checkout::{
    CartStore, CatalogClient, CheckoutSession, PricingEngine, SharedStore, ShopResult,
    StorefrontConfig,
};
use storefront_db::{Database, DbConfig};
use tracing::debug;

pub mod cart;
pub mod catalog;
pub mod checkout;

/// One page load: configuration plus an open store.
pub struct Page {
    pub config: StorefrontConfig,
    db: Database,
    store: SharedStore,
}

impl Page {
    /// Loads configuration and opens the store.
    ///
    /// `db_override` wins over both the config file and the environment.
    pub async fn open(
        config_path: Option<PathBuf>,
        db_override: Option<PathBuf>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = StorefrontConfig::load(config_path)?;
        if let Some(path) = db_override {
            config.store.database_path = Some(path);
        }

        let database_path = config.database_path();
        if let Some(parent) = database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %database_path.display(), "Opening store");

        let db = Database::new(DbConfig::new(database_path)).await?;
        let store: SharedStore = Arc::new(db.key_values());

        Ok(Page { config, db, store })
    }

    pub async fn cart(&self) -> ShopResult<CartStore> {
        CartStore::restore(self.store.clone()).await
    }

    pub fn pricing(&self) -> ShopResult<PricingEngine> {
        PricingEngine::from_config(&self.config)
    }

    /// A session with no checkout in progress (the cart page's view).
    pub fn new_checkout(&self) -> ShopResult<CheckoutSession> {
        Ok(CheckoutSession::new(self.store.clone(), self.pricing()?))
    }

    /// Rebuilds the checkout session from the store.
    pub async fn checkout(&self) -> ShopResult<CheckoutSession> {
        CheckoutSession::resume(self.store.clone(), self.pricing()?).await
    }

    pub fn catalog(&self) -> ShopResult<CatalogClient> {
        CatalogClient::new(self.config.catalog_url()?, self.config.request_timeout())
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}
