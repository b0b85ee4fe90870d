//! # Storefront Configuration
//!
//! Where the store file lives, which remote services to call, and the
//! local freight rates.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     STOREFRONT_DB_PATH=/tmp/storefront.db                               │
//! │     STOREFRONT_PRICING_URL=https://frete.example.com/quote              │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/storefront/storefront.toml (Linux)                        │
//! │     ~/Library/Application Support/com.storefront.storefront/… (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     local pricing only, fallback catalog, R$ 150,00 + R$ 2,50/km        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [store]
//! database_path = "/var/lib/storefront/storefront.db"
//!
//! [pricing]
//! service_url = "https://frete.example.com/quote"
//! base_cost_cents = 15000
//! cost_per_km_cents = 250
//! # request_timeout_secs = 10
//!
//! [catalog]
//! service_url = "http://localhost:5000"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use storefront_core::{FreightRates, Money, BASE_FREIGHT_COST, COST_PER_KM};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ShopError, ShopResult};

const CONFIG_FILE_NAME: &str = "storefront.toml";
const DATABASE_FILE_NAME: &str = "storefront.db";

// =============================================================================
// Sections
// =============================================================================

/// Durable store settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// SQLite file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

/// Freight pricing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Remote pricing endpoint. Unset means local formula only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,

    /// Fixed minimum freight charge, in centavos.
    #[serde(default = "default_base_cost_cents")]
    pub base_cost_cents: i64,

    /// Per-kilometre freight rate, in centavos.
    #[serde(default = "default_cost_per_km_cents")]
    pub cost_per_km_cents: i64,

    /// Timeout for remote calls. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_cost_cents() -> i64 {
    BASE_FREIGHT_COST.cents()
}

fn default_cost_per_km_cents() -> i64 {
    COST_PER_KM.cents()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            service_url: None,
            base_cost_cents: default_base_cost_cents(),
            cost_per_km_cents: default_cost_per_km_cents(),
            request_timeout_secs: None,
        }
    }
}

/// Product catalog settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL of the catalog service (`/api/health`, `/api/products`).
    /// Unset means the built-in fallback catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
}

// =============================================================================
// StorefrontConfig
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ShopResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ShopResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ShopError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ShopError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ShopError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ShopResult<()> {
        if let Some(ref url) = self.pricing.service_url {
            parse_service_url(url)?;
        }

        if let Some(ref url) = self.catalog.service_url {
            parse_service_url(url)?;
        }

        if self.pricing.base_cost_cents < 0 {
            return Err(ShopError::InvalidConfig(
                "base_cost_cents must not be negative".into(),
            ));
        }

        if self.pricing.cost_per_km_cents < 0 {
            return Err(ShopError::InvalidConfig(
                "cost_per_km_cents must not be negative".into(),
            ));
        }

        if self.pricing.request_timeout_secs == Some(0) {
            return Err(ShopError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STOREFRONT_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.store.database_path = Some(PathBuf::from(path));
        }

        if let Some(url) = lookup("STOREFRONT_PRICING_URL") {
            debug!(url = %url, "Overriding pricing URL from environment");
            self.pricing.service_url = Some(url).filter(|u| !u.is_empty());
        }

        if let Some(url) = lookup("STOREFRONT_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.service_url = Some(url).filter(|u| !u.is_empty());
        }

        if let Some(cents) = lookup("STOREFRONT_BASE_COST_CENTS") {
            match cents.parse::<i64>() {
                Ok(c) => self.pricing.base_cost_cents = c,
                Err(_) => warn!(value = %cents, "Ignoring non-numeric STOREFRONT_BASE_COST_CENTS"),
            }
        }

        if let Some(cents) = lookup("STOREFRONT_COST_PER_KM_CENTS") {
            match cents.parse::<i64>() {
                Ok(c) => self.pricing.cost_per_km_cents = c,
                Err(_) => warn!(value = %cents, "Ignoring non-numeric STOREFRONT_COST_PER_KM_CENTS"),
            }
        }

        if let Some(secs) = lookup("STOREFRONT_REQUEST_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                self.pricing.request_timeout_secs = Some(s);
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolved SQLite file path.
    ///
    /// Falls back to `storefront.db` in the working directory when the
    /// platform has no data directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(ref path) = self.store.database_path {
            return path.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }

    /// Local freight rates.
    pub fn freight_rates(&self) -> FreightRates {
        FreightRates::new(
            Money::from_cents(self.pricing.base_cost_cents),
            Money::from_cents(self.pricing.cost_per_km_cents),
        )
    }

    /// Parsed pricing service URL, if configured.
    pub fn pricing_url(&self) -> ShopResult<Option<Url>> {
        self.pricing
            .service_url
            .as_deref()
            .map(parse_service_url)
            .transpose()
    }

    /// Parsed catalog service URL, if configured.
    ///
    /// Always ends in `/` so `api/...` joins below the configured path.
    pub fn catalog_url(&self) -> ShopResult<Option<Url>> {
        let Some(raw) = self.catalog.service_url.as_deref() else {
            return Ok(None);
        };
        let mut url = parse_service_url(raw)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Some(url))
    }

    /// Timeout for remote calls, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.pricing.request_timeout_secs.map(Duration::from_secs)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "storefront", "storefront")
}

/// Parses a remote service URL, accepting only http and https.
pub fn parse_service_url(raw: &str) -> ShopResult<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ShopError::InvalidUrl(format!(
            "Service URL must use http:// or https://, got {}://",
            other
        ))),
    }
}
