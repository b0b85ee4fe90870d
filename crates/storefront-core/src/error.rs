//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Sequencing violations, cart limits             │
//! │  └── ValidationError  - User input rejected before pricing             │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Key-value store failures                       │
//! │                                                                         │
//! │  storefront-checkout errors                                            │
//! │  └── ShopError        - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ShopError → notice on screen      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Soft-degradable failures (corrupt snapshot, pricing service down) are
//! NOT errors: they resolve to a fallback value and never reach this enum.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was started with nothing in the cart.
    #[error("Cart is empty: add items before checking out")]
    EmptyCart,

    /// Finalization was requested before any freight quote.
    ///
    /// ## User Workflow
    /// ```text
    /// begin ──► (no recalculate) ──► finalize
    ///                                    │
    ///                                    ▼
    ///                             IncompleteQuote
    ///                                    │
    ///                                    ▼
    ///            UI shows: "Calculate freight before paying"
    /// ```
    #[error("Freight has not been calculated for this order")]
    IncompleteQuote,

    /// A checkout operation ran without a prior `begin`.
    #[error("No checkout in progress")]
    CheckoutNotStarted,

    /// The checkout already reached its terminal state.
    #[error("Checkout already finalized")]
    CheckoutFinalized,

    /// Cart has exceeded maximum allowed distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Item unit price exceeds maximum allowed.
    #[error("Unit price {price} exceeds maximum allowed ({max})")]
    PriceTooLarge { price: Money, max: Money },

    /// A cart snapshot violates the cart invariants.
    #[error("Invalid cart snapshot: {0}")]
    InvalidSnapshot(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before input reaches the resolver or the pricing engine, and
/// shown inline so the user can correct the field.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is above the accepted maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: String },

    /// Invalid format (e.g., non-numeric distance).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        };
        assert_eq!(err.to_string(), "Quantity 1000 exceeds maximum allowed (999)");
        assert_eq!(
            CoreError::IncompleteQuote.to_string(),
            "Freight has not been calculated for this order"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooShort {
            field: "location".to_string(),
            min: 3,
        };
        assert_eq!(err.to_string(), "location must be at least 3 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "distance_km".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
