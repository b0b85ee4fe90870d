//! # Checkout Error Types
//!
//! Error types for the stateful storefront services.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Error Categories                         │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Sequencing    │  │     Infrastructure      │ │
//! │  │                 │  │   / Input       │  │                         │ │
//! │  │  InvalidConfig  │  │  Core(EmptyCart,│  │  Db(DbError)            │ │
//! │  │  InvalidUrl     │  │   Incomplete…,  │  │  Http                   │ │
//! │  │  ConfigLoad…    │  │   Validation)   │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Remote pricing and catalog failures never surface here: they degrade to
//! local results and are reported through `PricingSource` / `CatalogSource`.

use storefront_core::{CoreError, ValidationError};
use storefront_db::DbError;
use thiserror::Error;

/// Result type alias for storefront service operations.
pub type ShopResult<T> = Result<T, ShopError>;

/// Storefront service error.
#[derive(Debug, Error)]
pub enum ShopError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Service URL could not be parsed or has the wrong scheme.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Sequencing violation or rejected input.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    /// Durable store failure.
    #[error("Store error: {0}")]
    Db(#[from] DbError),

    /// HTTP client could not be built or a request failed.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl ShopError {
    /// Returns the domain error, if this is one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            ShopError::Core(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ShopError {
    fn from(err: ValidationError) -> Self {
        ShopError::Core(CoreError::Validation(err))
    }
}

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        ShopError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ShopError {
    fn from(err: toml::de::Error) -> Self {
        ShopError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ShopError {
    fn from(err: toml::ser::Error) -> Self {
        ShopError::ConfigSaveFailed(err.to_string())
    }
}

impl From<reqwest::Error> for ShopError {
    fn from(err: reqwest::Error) -> Self {
        ShopError::Http(err.to_string())
    }
}

impl From<url::ParseError> for ShopError {
    fn from(err: url::ParseError) -> Self {
        ShopError::InvalidUrl(err.to_string())
    }
}
