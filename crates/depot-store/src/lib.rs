//! # depot-store: Back-office Services
//!
//! Process-scoped services around the `depot-core` engine: lock-protected
//! shared state, the customer registry, the point of sale, purchasing,
//! customer sheet import and CSV export.
//!
//! ## Module Structure
//! ```text
//! depot-store/
//! ├── lib.rs          ← You are here (Depot composition)
//! ├── error.rs        ← StoreError / StoreResult
//! ├── state/          ← LedgerState, SalesHistoryState
//! ├── customers.rs    ← CustomerRegistry (implements CustomerLookup)
//! ├── pos.rs          ← PointOfSale, DiscountSelector
//! ├── purchasing.rs   ← PurchasingBook
//! ├── import.rs       ← customer sheet import
//! └── export.rs       ← sales / stock CSV export
//! ```

use std::sync::Arc;

use depot_core::DiscountCatalog;

pub mod customers;
pub mod error;
pub mod export;
pub mod import;
pub mod pos;
pub mod purchasing;
pub mod state;

pub use customers::CustomerRegistry;
pub use error::{StoreError, StoreResult};
pub use import::ImportReport;
pub use pos::{DiscountSelector, FixedChoice, PointOfSale};
pub use purchasing::PurchasingBook;
pub use state::{LedgerState, SalesHistoryState};

/// Every service of one depot, sharing the same ledger and histories.
///
/// The discount catalog is fixed at construction.
#[derive(Debug, Clone)]
pub struct Depot {
    pub ledger: LedgerState,
    pub sales: SalesHistoryState,
    pub customers: CustomerRegistry,
    pub pos: PointOfSale,
    pub purchasing: PurchasingBook,
}

impl Depot {
    pub fn new(catalog: DiscountCatalog) -> Self {
        let ledger = LedgerState::new();
        let sales = SalesHistoryState::new();

        Depot {
            pos: PointOfSale::new(ledger.clone(), sales.clone(), Arc::new(catalog)),
            purchasing: PurchasingBook::new(ledger.clone()),
            customers: CustomerRegistry::new(),
            ledger,
            sales,
        }
    }
}

impl Default for Depot {
    fn default() -> Self {
        Depot::new(DiscountCatalog::standard())
    }
}
