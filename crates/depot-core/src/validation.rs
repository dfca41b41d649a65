//! # Validation Module
//!
//! Field-level rules shared by product construction, ledger mutation and the
//! purchasing desk.
//!
//! ## Usage
//! ```rust
//! use depot_core::validation::{validate_quantity, validate_required};
//!
//! assert!(validate_required("name", "Gas 5kg").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;

/// Maximum length of a purchase invoice number after sanitization.
pub const MAX_INVOICE_NUMBER_LEN: usize = 25;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty or whitespace-only text.
pub fn validate_required(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Normalizes a typed invoice number.
///
/// ## Rules
/// - Keeps only ASCII letters, digits and `-`
/// - Truncates to [`MAX_INVOICE_NUMBER_LEN`] characters
///
/// ## Example
/// ```rust
/// use depot_core::validation::sanitize_invoice_number;
///
/// assert_eq!(sanitize_invoice_number(" F-001 / abc "), "F-001abc");
/// ```
pub fn sanitize_invoice_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(MAX_INVOICE_NUMBER_LEN)
        .collect()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity for ledger mutation.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity", qty));
    }
    Ok(())
}

/// Validates a purchase cost (tax included).
///
/// ## Rules
/// - Must be positive (> 0); free stock is not a purchase
pub fn validate_purchase_cost(cost: Money) -> CoreResult<()> {
    if !cost.is_positive() {
        return Err(ValidationError::must_be_positive(
            "purchase cost",
            cost.pesos(),
        ));
    }
    Ok(())
}

/// Validates a seller commission.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero commission is allowed
pub fn validate_commission(commission: Money) -> CoreResult<()> {
    if commission.is_negative() {
        return Err(ValidationError::must_not_be_negative(
            "commission",
            commission.pesos(),
        ));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Gas 15kg").is_ok());
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_purchase_cost() {
        assert!(validate_purchase_cost(Money::from_pesos(1)).is_ok());
        assert!(validate_purchase_cost(Money::zero()).is_err());
        assert!(validate_purchase_cost(Money::from_pesos(-100)).is_err());
    }

    #[test]
    fn test_validate_commission() {
        assert!(validate_commission(Money::zero()).is_ok());
        assert!(validate_commission(Money::from_pesos(3000)).is_ok());
        assert!(validate_commission(Money::from_pesos(-1)).is_err());
    }

    #[test]
    fn test_sanitize_invoice_number() {
        assert_eq!(sanitize_invoice_number("F001"), "F001");
        assert_eq!(sanitize_invoice_number("F 001/ñ#"), "F001");
        assert_eq!(sanitize_invoice_number(&"A".repeat(40)).len(), MAX_INVOICE_NUMBER_LEN);
        assert_eq!(sanitize_invoice_number("!!!"), "");
    }
}
