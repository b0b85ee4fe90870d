//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The storefront pages used to sum prices as JS numbers:                 │
//! │    30000.10 + 0.20 = 30000.300000000003                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    3000010 + 20 = 3000030  (exact, always)                              │
//! │                                                                         │
//! │  Decimals only appear at two edges:                                     │
//! │    • service payloads (converted once, at the I/O boundary)             │
//! │    • presentation (formatted by the UI, never parsed back)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(3_000_000); // R$ 30.000,00
//! let line_total = price * 2;
//! assert_eq!(line_total.cents(), 6_000_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest BRL unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between amounts stay representable
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serializes as the bare integer**: persisted snapshots store centavos
///
/// ## Where Money Flows
/// ```text
/// Item.unit_price ──► line total ──► CartTotals.amount ──► CheckoutState.subtotal
///                                                                 │
/// FreightRates ──► local freight ─┐                               ▼
///                                 ├──► FreightQuote.cost ──► order total
/// pricing service quote ──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -R$ 5,50.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(30_000, 0).cents(), 3_000_000);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).reais(), 10);
    /// assert_eq!(Money::from_cents(-550).reais(), -5);
    /// ```
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Largest representable amount.
    pub const MAX: Money = Money(i64::MAX);

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(3_000_000);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 6_000_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Scales a rate by a non-integer factor, rounding to the nearest
    /// centavo (half away from zero).
    ///
    /// ## User Workflow
    /// ```text
    /// COST_PER_KM = R$ 2,50
    /// distance    = 198.4 km
    ///      │
    ///      ▼
    /// scale(198.4) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// R$ 496,00
    /// ```
    ///
    /// Returns `None` when the factor is not finite or the result does not
    /// fit in an `i64`.
    pub fn scale(&self, factor: f64) -> Option<Money> {
        // 2^63: the first f64 past i64::MAX.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;

        let scaled = (self.0 as f64 * factor).round();
        if !scaled.is_finite() || scaled < -LIMIT || scaled >= LIMIT {
            return None;
        }
        Some(Money(scaled as i64))
    }

    /// Converts a decimal amount in reais (as sent by remote services) to
    /// centavos. Returns `None` for NaN, infinite or out-of-range input.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(30000.0).unwrap().cents(), 3_000_000);
    /// assert_eq!(Money::from_decimal(644.999).unwrap().cents(), 64_500);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// assert!(Money::from_decimal(1e300).is_none());
    /// ```
    pub fn from_decimal(reais: f64) -> Option<Money> {
        Money::from_cents(100).scale(reais)
    }

    /// Checked addition. `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Addition that clamps at the `i64` bounds instead of wrapping.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented display (`R$10.99`).
///
/// Locale formatting (`R$ 10,99`) belongs to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R${}.{:02}", sign, self.reais().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
