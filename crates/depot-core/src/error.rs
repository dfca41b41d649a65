//! # Error Types
//!
//! The engine has exactly one hard error kind: [`ValidationError`].
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Engine Outcomes                                 │
//! │                                                                         │
//! │  ValidationError (this file)  - aborts the single operation            │
//! │  ├── empty product name / category                                     │
//! │  ├── purchase cost <= 0, commission < 0                                │
//! │  ├── quantity <= 0 on ledger mutation                                  │
//! │  └── price, stock or purchase total past the i64 range                 │
//! │                                                                         │
//! │  Soft outcomes (ordinary return values, never errors)                  │
//! │  ├── Option::None          - product / invoice / order not found       │
//! │  ├── AppliedDiscount::None - discount index out of range               │
//! │  └── bool false            - stock decrease rejected                   │
//! │                                                                         │
//! │  depot-store errors (separate crate)                                   │
//! │  └── StoreError            - CSV, file and workflow failures           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation failures raised by product construction and ledger
/// mutation.
///
/// Raising one never leaves a half-built object or a partially mutated
/// ledger behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative, got {value}")]
    MustNotBeNegative { field: String, value: i64 },

    /// Result does not fit in an `i64`.
    #[error("{field} is out of range")]
    Overflow { field: String },
}

impl ValidationError {
    /// Creates a `Required` error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a `MustBePositive` error for the given field and value.
    pub fn must_be_positive(field: impl Into<String>, value: i64) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
            value,
        }
    }

    /// Creates a `MustNotBeNegative` error for the given field and value.
    pub fn must_not_be_negative(field: impl Into<String>, value: i64) -> Self {
        ValidationError::MustNotBeNegative {
            field: field.into(),
            value,
        }
    }

    /// Creates an `Overflow` error for the given field.
    pub fn overflow(field: impl Into<String>) -> Self {
        ValidationError::Overflow {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for engine operations that can fail validation.
pub type CoreResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
