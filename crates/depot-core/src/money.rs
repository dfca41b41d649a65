//! # Money Module
//!
//! Provides the `Money` type for monetary values in whole Chilean pesos.
//!
//! ## Why Integer Pesos?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  The peso has no minor unit in circulation. Purchase costs,             │
//! │  commissions and fixed discounts are all whole pesos, so an i64         │
//! │  holds every value exactly and totals never drift.                      │
//! │                                                                         │
//! │    cost 10_000 + commission 1_000 = sale price 11_000  ✅               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use depot_core::money::Money;
//!
//! let cost = Money::from_pesos(10_000);
//! let commission = Money::from_pesos(1_500);
//! assert_eq!((cost + commission).pesos(), 11_500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole pesos.
///
/// ## Design Decisions
/// - **i64 (signed)**: a discount larger than the price yields a negative
///   line total instead of wrapping or panicking
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **serde transparent**: serializes as a bare integer in exports
///
/// ## Where Money Flows
/// ```text
/// Product.purchase_cost ─┬─► Product.sale_price ──► SaleLine.unit_price
/// Product.commission ────┘                              │
///                                                       ▼
/// DiscountCatalog ──► SaleLine.discount ──► Sale::net_total()
///
/// PurchaseLine.cost × quantity ──► PurchaseOrder::total_estimated()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole pesos.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::money::Money;
    ///
    /// let price = Money::from_pesos(25_000);
    /// assert_eq!(price.pesos(), 25_000);
    /// ```
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos)
    }

    /// Returns the value in whole pesos.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

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

    /// Adds two amounts, or `None` if the result does not fit in an `i64`.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(pesos) => Some(Money(pesos)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::money::Money;
    ///
    /// let unit_cost = Money::from_pesos(10_000);
    /// assert_eq!(unit_cost.checked_mul_quantity(3), Some(Money::from_pesos(30_000)));
    /// assert_eq!(unit_cost.checked_mul_quantity(i64::MAX), None);
    /// ```
    ///
    /// ## Purchase Workflow
    /// ```text
    /// Invoice line: Gas 5kg, cost $10000, quantity 2
    ///      │
    ///      ▼
    /// checked_mul_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line amount: $20000
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(pesos) => Some(Money(pesos)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `$<pesos>` rendering for logs and debugging.
///
/// ## Note
/// No thousands separators or locale handling; hosts format for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-${}", self.0.unsigned_abs())
        } else {
            write!(f, "${}", self.0)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the `i64` bounds instead of wrapping.
///
/// Sale totals use these operators; purchase totals and product prices go
/// through the checked methods and report overflow as a validation error.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Totals are folds over line amounts.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pesos() {
        let money = Money::from_pesos(11_500);
        assert_eq!(money.pesos(), 11_500);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_pesos(11_500).to_string(), "$11500");
        assert_eq!(Money::from_pesos(0).to_string(), "$0");
        assert_eq!(Money::from_pesos(-500).to_string(), "-$500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pesos(1000);
        let b = Money::from_pesos(500);

        assert_eq!((a + b).pesos(), 1500);
        assert_eq!((a - b).pesos(), 500);
        assert_eq!(a.checked_mul_quantity(3), Some(Money::from_pesos(3000)));
        assert_eq!(a.checked_add(b), Some(Money::from_pesos(1500)));
    }

    #[test]
    fn test_overflow_is_reported_or_saturated() {
        let max = Money::from_pesos(i64::MAX);
        let one = Money::from_pesos(1);

        assert_eq!(max.checked_add(one), None);
        assert_eq!(Money::from_pesos(10_000).checked_mul_quantity(i64::MAX / 1000), None);
        assert_eq!(max + one, max);
        assert_eq!(Money::from_pesos(i64::MIN) - one, Money::from_pesos(i64::MIN));
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_pesos(11_500), Money::from_pesos(5_500)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.pesos(), 17_000);

        let empty: Vec<Money> = Vec::new();
        assert!(empty.into_iter().sum::<Money>().is_zero());
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_pesos(1).is_positive());
        assert!(Money::from_pesos(-1).is_negative());
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_pesos(2500)).unwrap();
        assert_eq!(json, "2500");
    }
}
