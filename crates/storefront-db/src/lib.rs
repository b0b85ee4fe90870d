//! # storefront-db: Durable Key-Value Store for the Storefront
//!
//! The storefront pages share state through a small durable key-value
//! store: the cart snapshot and the three checkout handoff scalars. This
//! crate owns that store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Data Flow                                │
//! │                                                                         │
//! │  CartStore::persist()         CheckoutSession::begin()                  │
//! │       │                              │                                  │
//! │       ▼                              ▼                                  │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐  ┌──────────────────┐  ┌──────────────┐    │   │
//! │  │   │   Database    │  │ KeyValueStore    │  │  Migrations  │    │   │
//! │  │   │   (pool.rs)   │  │ (store.rs)       │  │  (embedded)  │    │   │
//! │  │   │ SqlitePool    │◄─│ KeyValueRepo     │  │ 001_kv.sql   │    │   │
//! │  │   │               │  │ MemoryStore      │  │              │    │   │
//! │  │   └───────────────┘  └──────────────────┘  └──────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storefront.db (local file, WAL mode)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`store`] - The `KeyValueStore` seam, key names, typed JSON helpers
//! - [`repository`] - SQLite-backed store
//! - [`memory`] - In-process store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{keys, Database, DbConfig, KeyValueStore};
//!
//! let db = Database::new(DbConfig::new("storefront.db")).await?;
//! let store = db.key_values();
//! store.set(keys::CART, "[]").await?;
//! ```

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::{DbError, DbResult};
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};
pub use repository::key_value::KeyValueRepository;
pub use store::{keys, KeyValueStore};
