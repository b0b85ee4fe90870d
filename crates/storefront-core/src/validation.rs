//! # Validation Module
//!
//! Input checks that run before anything reaches the resolver or the
//! pricing engine.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Presentation                                                  │
//! │  └── Field-level prompts ("digite ao menos 3 caracteres")               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── location query length                                              │
//! │  └── distance is a finite number in (0, MAX_DISTANCE_KM]                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: DistanceResolver / PricingEngine                              │
//! │  └── total functions: any input still yields a result                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_DISTANCE_KM, MIN_LOCATION_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest location query accepted.
const MAX_LOCATION_QUERY_LEN: usize = 100;

/// Validates a free-text location query.
///
/// ## Rules
/// - At least 3 characters after trimming
/// - At most 100 characters
///
/// ## Returns
/// The trimmed query.
///
/// ```rust
/// use storefront_core::validation::validate_location_query;
///
/// assert_eq!(validate_location_query("  18200-000 ").unwrap(), "18200-000");
/// assert!(validate_location_query("sp").is_err());
/// ```
pub fn validate_location_query(query: &str) -> ValidationResult<&str> {
    let query = query.trim();
    let len = query.chars().count();

    if len < MIN_LOCATION_QUERY_LEN {
        return Err(ValidationError::TooShort {
            field: "location".to_string(),
            min: MIN_LOCATION_QUERY_LEN,
        });
    }

    if len > MAX_LOCATION_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "location".to_string(),
            max: MAX_LOCATION_QUERY_LEN,
        });
    }

    Ok(query)
}

/// Validates a distance entered or computed for pricing.
pub fn validate_distance_km(distance_km: f64) -> ValidationResult<f64> {
    if !distance_km.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "distance_km".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if distance_km <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "distance_km".to_string(),
        });
    }

    if distance_km > MAX_DISTANCE_KM {
        return Err(ValidationError::TooLarge {
            field: "distance_km".to_string(),
            max: format!("{MAX_DISTANCE_KM} km"),
        });
    }

    Ok(distance_km)
}

/// Parses a user-typed distance, accepting `,` or `.` as decimal
/// separator.
///
/// ```rust
/// use storefront_core::validation::parse_distance_km;
///
/// assert_eq!(parse_distance_km("198,5").unwrap(), 198.5);
/// assert!(parse_distance_km("longe").is_err());
/// ```
pub fn parse_distance_km(input: &str) -> ValidationResult<f64> {
    let normalized = input.trim().replace(',', ".");
    let distance_km = normalized
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "distance_km".to_string(),
            reason: format!("'{}' is not a number", input.trim()),
        })?;

    validate_distance_km(distance_km)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_location_query() {
        assert!(validate_location_query("182").is_ok());
        assert!(validate_location_query("Campinas").is_ok());
        assert!(validate_location_query("são").is_ok());

        assert!(validate_location_query("").is_err());
        assert!(validate_location_query("   ab   ").is_err());
        assert!(validate_location_query(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_distance_km() {
        assert_eq!(validate_distance_km(198.0).unwrap(), 198.0);

        assert!(matches!(
            validate_distance_km(0.0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_distance_km(-3.0).is_err());
        assert!(matches!(
            validate_distance_km(f64::NAN),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_distance_upper_bound() {
        assert_eq!(validate_distance_km(MAX_DISTANCE_KM).unwrap(), MAX_DISTANCE_KM);
        assert!(matches!(
            validate_distance_km(MAX_DISTANCE_KM + 1.0),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(matches!(
            parse_distance_km("1e300"),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_parse_distance_km() {
        assert_eq!(parse_distance_km("198").unwrap(), 198.0);
        assert_eq!(parse_distance_km(" 12.25 ").unwrap(), 12.25);
        assert!(parse_distance_km("").is_err());
        assert!(parse_distance_km("NaN").is_err());
        assert!(parse_distance_km("-5").is_err());
    }
}
