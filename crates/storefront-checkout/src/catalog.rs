//! # Product Catalog
//!
//! Loads the product list from the catalog service, or falls back to the
//! built-in catalog when the service is unconfigured or unavailable.
//!
//! ## Fetch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogClient::fetch()                                                 │
//! │       │                                                                 │
//! │       ├── no service_url ─────────────────────────┐                     │
//! │       ▼                                           │                     │
//! │  GET {base}/api/health ── failure ────────────────┤                     │
//! │       │ 2xx                                       │                     │
//! │       ▼                                           ▼                     │
//! │  GET {base}/api/products ── failure ──► Catalog { fallback products,   │
//! │       │ 2xx + valid JSON                            source: Fallback }  │
//! │       ▼                                                                 │
//! │  Catalog { products, source: Remote }                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use storefront_core::{Item, Money, ValidationError, MAX_UNIT_PRICE};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ShopError, ShopResult};

// =============================================================================
// Types
// =============================================================================

/// A product as published by the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in reais, as sent on the wire.
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

impl CatalogProduct {
    /// Price in centavos, if the wire value is usable.
    pub fn unit_price(&self) -> Option<Money> {
        Money::from_decimal(self.price).filter(|m| !m.is_negative() && *m <= MAX_UNIT_PRICE)
    }

    /// Converts into a cart item with quantity 1.
    pub fn to_item(&self) -> ShopResult<Item> {
        let unit_price = self
            .unit_price()
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: format!("product {} has unusable price {}", self.id, self.price),
            })?;
        Ok(Item::new(self.id, self.name.clone(), unit_price))
    }
}

/// Where a catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Remote,
    /// Built-in list; the UI shows an offline notice.
    Fallback,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Remote => write!(f, "remote"),
            CatalogSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A loaded product list.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub products: Vec<CatalogProduct>,
    pub source: CatalogSource,
}

impl Catalog {
    /// The built-in catalog.
    pub fn fallback() -> Self {
        Catalog {
            products: vec![CatalogProduct {
                id: 1,
                name: "Lava-louças industrial P-50".to_string(),
                description: "Ideal para cozinhas de pequeno e médio porte.".to_string(),
                price: 30_000.00,
                image: "https://via.placeholder.com/300x200?text=Modelo+P-50".to_string(),
            }],
            source: CatalogSource::Fallback,
        }
    }

    pub fn find(&self, id: u32) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn is_fallback(&self) -> bool {
        self.source == CatalogSource::Fallback
    }
}

// =============================================================================
// Client
// =============================================================================

/// Catalog service client.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl CatalogClient {
    /// Creates a client. `base_url` of `None` always yields the fallback
    /// catalog.
    pub fn new(base_url: Option<Url>, timeout: Option<Duration>) -> ShopResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(CatalogClient {
            client: builder.build()?,
            base_url,
        })
    }

    /// Loads the catalog. Never fails; problems yield the fallback.
    pub async fn fetch(&self) -> Catalog {
        let Some(base) = &self.base_url else {
            debug!("No catalog service configured, using fallback catalog");
            return Catalog::fallback();
        };

        match self.fetch_remote(base).await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded from service");
                Catalog {
                    products,
                    source: CatalogSource::Remote,
                }
            }
            Err(e) => {
                warn!(error = %e, "Catalog service unavailable, using fallback catalog");
                Catalog::fallback()
            }
        }
    }

    /// True when `{base}/api/health` answers with a 2xx status.
    pub async fn is_available(&self) -> bool {
        match &self.base_url {
            Some(base) => self.probe_health(base).await.is_ok(),
            None => false,
        }
    }

    async fn probe_health(&self, base: &Url) -> ShopResult<()> {
        let url = base.join("api/health")?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ShopError::Http(format!(
                "health check returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn fetch_remote(&self, base: &Url) -> ShopResult<Vec<CatalogProduct>> {
        self.probe_health(base).await?;

        let url = base.join("api/products")?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ShopError::Http(format!(
                "products returned {}",
                response.status()
            )));
        }

        let products: Vec<CatalogProduct> = response.json().await?;

        if let Some(bad) = products.iter().find(|p| p.unit_price().is_none()) {
            return Err(ShopError::Http(format!(
                "product {} has unusable price {}",
                bad.id, bad.price
            )));
        }

        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn healthy() -> Router {
        Router::new().route(
            "/api/health",
            get(|| async { Json(json!({ "status": "OK", "message": "API funcionando" })) }),
        )
    }

    #[test]
    fn test_fallback_catalog() {
        let catalog = Catalog::fallback();
        assert!(catalog.is_fallback());

        let item = catalog.find(1).unwrap().to_item().unwrap();
        assert_eq!(item.name, "Lava-louças industrial P-50");
        assert_eq!(item.unit_price.cents(), 3_000_000);
        assert_eq!(item.quantity, 1);
        assert!(catalog.find(2).is_none());
    }

    #[test]
    fn test_product_json_shape() {
        let product: CatalogProduct =
            serde_json::from_str(r#"{"id":7,"name":"P-80","price":45000.5}"#).unwrap();
        assert_eq!(product.description, "");
        assert_eq!(product.unit_price().unwrap().cents(), 4_500_050);

        let huge: CatalogProduct =
            serde_json::from_str(r#"{"id":8,"name":"X","price":1e300}"#).unwrap();
        assert!(huge.unit_price().is_none());
        assert!(huge.to_item().is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_uses_fallback() {
        let client = CatalogClient::new(None, None).unwrap();
        assert_eq!(client.fetch().await, Catalog::fallback());
        assert!(!client.is_available().await);
    }

    #[tokio::test]
    async fn test_remote_catalog() {
        let router = healthy().route(
            "/api/products",
            get(|| async {
                Json(json!([
                    { "id": 1, "name": "P-50", "description": "", "price": 30000.0, "image": "" },
                    { "id": 2, "name": "P-80", "description": "", "price": 45000.0, "image": "" }
                ]))
            }),
        );
        let client = CatalogClient::new(Some(serve(router).await), None).unwrap();

        assert!(client.is_available().await);
        let catalog = client.fetch().await;
        assert_eq!(catalog.source, CatalogSource::Remote);
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.find(2).unwrap().to_item().unwrap().unit_price.cents(), 4_500_000);
    }

    #[tokio::test]
    async fn test_failed_health_check_skips_products() {
        let router = Router::new()
            .route(
                "/api/health",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .route("/api/products", get(|| async { Json(json!([])) }));
        let client = CatalogClient::new(Some(serve(router).await), None).unwrap();

        assert!(client.fetch().await.is_fallback());
    }

    #[tokio::test]
    async fn test_bad_products_payload_uses_fallback() {
        let router = healthy().route(
            "/api/products",
            get(|| async { Json(json!([{ "id": 1, "name": "P-50", "price": -1.0 }])) }),
        );
        let client = CatalogClient::new(Some(serve(router).await), None).unwrap();

        assert!(client.fetch().await.is_fallback());
    }

    #[tokio::test]
    async fn test_unreachable_service_uses_fallback() {
        let base = Url::parse("http://127.0.0.1:1/").unwrap();
        let client = CatalogClient::new(Some(base), Some(Duration::from_secs(2))).unwrap();

        assert!(client.fetch().await.is_fallback());
    }
}
