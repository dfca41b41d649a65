//! # Point of Sale
//!
//! Counter workflow over the shared ledger and sales history.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Point of Sale Flow                              │
//! │                                                                         │
//! │  open_sale(channel, tax id)                                             │
//! │       │  customer unknown ──────────► CustomerNotFound                   │
//! │       ▼                                                                 │
//! │  add_product(sale, name, qty, selector)        (repeatable)             │
//! │       │  qty <= 0 ──────────────────► Validation                        │
//! │       │  no stock / not enough ─────► ProductUnavailable /              │
//! │       │                               InsufficientStock                 │
//! │       │  stock taken under one write lock                               │
//! │       │  then per unit:                                                 │
//! │       │     0 candidates ──► no discount                                │
//! │       │     1 candidate  ──► applied without asking                     │
//! │       │     2+           ──► selector picks; bad pick ──► no discount   │
//! │       ▼                                                                 │
//! │  complete(sale) ──────────────────────► SalesHistory                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The selector may block on a person. It is only called after the ledger
//! lock has been released.

use std::sync::Arc;

use depot_core::discount::pick;
use depot_core::validation::validate_quantity;
use depot_core::{
    AppliedDiscount, Channel, CustomerLookup, CustomerRef, DiscountCatalog, Money, Product, Sale,
    SaleSummary,
};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::state::{LedgerState, SalesHistoryState};

// =============================================================================
// Discount Selection
// =============================================================================

/// Chooses among several candidate discounts for one unit.
///
/// The returned index is used as typed; anything out of range means no
/// discount.
pub trait DiscountSelector {
    fn select(&mut self, product: &Product, discounts: &[Money]) -> i64;
}

impl<F> DiscountSelector for F
where
    F: FnMut(&Product, &[Money]) -> i64,
{
    fn select(&mut self, product: &Product, discounts: &[Money]) -> i64 {
        self(product, discounts)
    }
}

/// Always answers the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedChoice(pub i64);

impl DiscountSelector for FixedChoice {
    fn select(&mut self, _product: &Product, _discounts: &[Money]) -> i64 {
        self.0
    }
}

// =============================================================================
// Point of Sale
// =============================================================================

#[derive(Debug, Clone)]
pub struct PointOfSale {
    ledger: LedgerState,
    history: SalesHistoryState,
    catalog: Arc<DiscountCatalog>,
}

impl PointOfSale {
    pub fn new(
        ledger: LedgerState,
        history: SalesHistoryState,
        catalog: Arc<DiscountCatalog>,
    ) -> Self {
        PointOfSale {
            ledger,
            history,
            catalog,
        }
    }

    /// Starts a sale for a registered customer.
    pub fn open_sale(
        &self,
        channel: Channel,
        tax_id: &str,
        customers: &impl CustomerLookup,
    ) -> StoreResult<Sale> {
        let customer = customers
            .find_by_tax_id(tax_id)
            .ok_or_else(|| StoreError::CustomerNotFound(tax_id.to_string()))?;

        let sale = Sale::new(channel, CustomerRef::from(&customer));
        debug!(sale_id = %sale.id(), %channel, tax_id = %tax_id, "Sale opened");
        Ok(sale)
    }

    /// Takes `quantity` units from stock and adds one line per unit.
    ///
    /// Returns the number of lines added.
    pub fn add_product(
        &self,
        sale: &mut Sale,
        name: &str,
        quantity: i64,
        selector: &mut impl DiscountSelector,
    ) -> StoreResult<usize> {
        validate_quantity(quantity)?;
        let product = self.ledger.take(name, quantity)?;

        let discounts = self.catalog.discounts_for(product.name(), sale.channel());
        for _ in 0..quantity {
            let applied = match discounts.as_slice() {
                [] => AppliedDiscount::None,
                [only] => AppliedDiscount::Amount(*only),
                many => pick(many, selector.select(&product, many)),
            };
            sale.add_line_item(product.clone(), applied.amount());
        }

        debug!(
            sale_id = %sale.id(),
            product = %product.name(),
            quantity,
            "Product added to sale"
        );
        Ok(quantity as usize)
    }

    /// Records a finished sale.
    ///
    /// A sale without lines is still recorded; it contributes nothing to
    /// revenue or to the export rows.
    pub fn complete(&self, sale: Sale) -> SaleSummary {
        if sale.is_empty() {
            debug!(sale_id = %sale.id(), "Recording sale without lines");
        }
        self.history.record(sale)
    }

    pub fn catalog(&self) -> &DiscountCatalog {
        &self.catalog
    }
}
