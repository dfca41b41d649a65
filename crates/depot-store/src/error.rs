//! # Store Error Types
//!
//! Errors raised by the service layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (depot-core)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds file, sheet and workflow failures     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  anyhow::Error (apps/backoffice) ← reported to the operator            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Engine lookups stay soft (`Option`). The variants here cover workflow
//! steps that cannot continue, such as opening a sale for a tax id nobody
//! registered.

use std::path::PathBuf;

use depot_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected by the engine.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No customer registered under this tax id.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Product is not in the ledger or has no stock at all.
    #[error("Product not available: {0}")]
    ProductUnavailable(String),

    /// Not enough stock for the requested quantity.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// No purchase order with this id.
    #[error("Purchase order not found: {0}")]
    OrderNotFound(String),

    /// Invoice number was empty after sanitizing.
    #[error("Invoice number '{0}' has no usable characters")]
    InvalidInvoiceNumber(String),

    /// Reading or writing a CSV file failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Opening or reading a workbook sheet failed.
    #[error("Failed to read workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Opening or creating a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for service operations.
pub type StoreResult<T> = Result<T, StoreError>;
