//! # Ledger State
//!
//! The process-wide stock ledger behind a read/write lock.
//!
//! ## Access Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger State Operations                              │
//! │                                                                         │
//! │  Caller                    LedgerState                 Lock             │
//! │  ──────                    ───────────                 ────             │
//! │                                                                         │
//! │  restock ────────────────► register_or_restock() ────► write            │
//! │  sell ───────────────────► take() ───────────────────► write            │
//! │  post invoice ───────────► with_ledger_mut() ────────► write            │
//! │                                                                         │
//! │  availability ───────────► has_available() ──────────► read             │
//! │  listing / export ───────► entries(), with_ledger() ─► read             │
//! │                                                                         │
//! │  One writer at a time; readers run side by side. Every method           │
//! │  finishes its work before releasing the lock, so a reader never         │
//! │  sees half of an operation.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock};

use depot_core::{Money, Product, RestockOutcome, StockEntry, StockLedger};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Shared handle to the stock ledger.
///
/// Cloning the handle shares the same ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    ledger: Arc<RwLock<StockLedger>>,
}

impl LedgerState {
    pub fn new() -> Self {
        LedgerState::default()
    }

    /// Runs `f` with read access to the ledger.
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&StockLedger) -> R,
    {
        let ledger = self.ledger.read().expect("Ledger lock poisoned");
        f(&ledger)
    }

    /// Runs `f` with exclusive write access to the ledger.
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut StockLedger) -> R,
    {
        let mut ledger = self.ledger.write().expect("Ledger lock poisoned");
        f(&mut ledger)
    }

    /// Registers or restocks a product, logging when pricing was ignored.
    pub fn register_or_restock(
        &self,
        name: &str,
        category: &str,
        purchase_cost: Money,
        commission: Money,
        quantity: i64,
    ) -> StoreResult<RestockOutcome> {
        let outcome = self.with_ledger_mut(|ledger| {
            ledger.register_or_restock(name, category, purchase_cost, commission, quantity)
        })?;

        match outcome {
            RestockOutcome::Registered { quantity } => {
                info!(product = %name, quantity, "Product registered");
            }
            RestockOutcome::Restocked {
                quantity,
                pricing_ignored,
            } => {
                if pricing_ignored {
                    warn!(
                        product = %name,
                        %purchase_cost,
                        %commission,
                        "Restock pricing differs from stored product; keeping original price"
                    );
                }
                debug!(product = %name, quantity, "Product restocked");
            }
        }

        Ok(outcome)
    }

    /// Checks and removes `quantity` units in one step.
    ///
    /// Returns the stored product so the caller can build sale lines from it.
    pub fn take(&self, name: &str, quantity: i64) -> StoreResult<Product> {
        self.with_ledger_mut(|ledger| {
            let available = ledger.quantity_of(name).unwrap_or(0);
            let product = match ledger.lookup(name) {
                Some(product) if available > 0 => product.clone(),
                _ => return Err(StoreError::ProductUnavailable(name.to_string())),
            };

            if !ledger.decrease(name, quantity) {
                debug!(product = %name, available, requested = quantity, "Stock decrease rejected");
                return Err(StoreError::InsufficientStock {
                    name: product.name().to_string(),
                    available,
                    requested: quantity,
                });
            }

            Ok(product)
        })
    }

    /// Decreases stock when enough is on hand; a rejected decrease is
    /// logged and leaves stock as it was.
    pub fn decrease(&self, name: &str, quantity: i64) -> bool {
        self.with_ledger_mut(|ledger| {
            let decreased = ledger.decrease(name, quantity);
            if !decreased {
                let available = ledger.quantity_of(name).unwrap_or(0);
                debug!(product = %name, available, requested = quantity, "Stock decrease rejected");
            }
            decreased
        })
    }

    pub fn has_available(&self, name: &str, quantity: i64) -> bool {
        self.with_ledger(|ledger| ledger.has_available(name, quantity))
    }

    pub fn lookup(&self, name: &str) -> Option<Product> {
        self.with_ledger(|ledger| ledger.lookup(name).cloned())
    }

    pub fn quantity_of(&self, name: &str) -> Option<i64> {
        self.with_ledger(|ledger| ledger.quantity_of(name))
    }

    /// Copy of every entry, in key order.
    pub fn entries(&self) -> Vec<StockEntry> {
        self.with_ledger(|ledger| ledger.entries().cloned().collect())
    }

    /// Copy of the entries matching `criterion` by name or category.
    pub fn search(&self, criterion: &str) -> Vec<StockEntry> {
        self.with_ledger(|ledger| ledger.search(criterion).cloned().collect())
    }
}
