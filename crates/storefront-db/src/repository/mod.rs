//! # Repository Module
//!
//! SQLite-backed implementations of the store seams.
//!
//! ```text
//! CartStore / CheckoutSession
//!       │
//!       │  store.set_many(&[(keys::CHECKOUT_SUBTOTAL, …), …])
//!       ▼
//! KeyValueRepository
//! ├── get(&self, key)
//! ├── set(&self, key, value)
//! ├── set_many(&self, entries)   ← one transaction
//! └── remove_many(&self, keys)   ← one transaction
//!       │
//!       ▼
//! key_value table
//! ```

pub mod key_value;
