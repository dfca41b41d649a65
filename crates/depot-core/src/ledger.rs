//! # Stock Ledger
//!
//! Quantity on hand per product, keyed by [`ProductKey`].
//!
//! ## Mutation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Ledger Operations                              │
//! │                                                                         │
//! │  register_or_restock(name, ..., qty)                                    │
//! │       │                                                                 │
//! │       ├── qty <= 0 ──────────────► ValidationError, nothing changes     │
//! │       │                                                                 │
//! │       ├── key exists ────────────► quantity += qty                      │
//! │       │                             (past i64::MAX: ValidationError)    │
//! │       │                             stored Product kept as-is           │
//! │       │                             (first registration sets pricing)   │
//! │       │                                                                 │
//! │       └── new key ───────────────► Product::new(...)?, quantity = qty   │
//! │                                                                         │
//! │  decrease(name, qty)                                                    │
//! │       │                                                                 │
//! │       ├── qty <= 0 / unknown / qty > stock ──► false, nothing changes   │
//! │       │                                                                 │
//! │       └── otherwise ─────────────► quantity -= qty, true                │
//! │                                                                         │
//! │  INVARIANT: quantity >= 0 for every entry, always                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger also keeps the history of posted purchase invoices, since
//! posting an invoice is the ledger's second way of receiving stock.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::purchase::InvoiceHistory;
use crate::types::{Product, ProductKey};
use crate::validation::validate_quantity;

// =============================================================================
// Stock Entry
// =============================================================================

/// A product and its quantity on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockEntry {
    product: Product,
    quantity: i64,
}

impl StockEntry {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Flattened stock entry for tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockExportRow {
    pub name: String,
    pub category: String,
    pub purchase_cost: Money,
    pub stock: i64,
}

// =============================================================================
// Restock Outcome
// =============================================================================

/// What `register_or_restock` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestockOutcome {
    /// A new entry was created with the given quantity.
    Registered { quantity: i64 },
    /// An existing entry grew.
    ///
    /// `pricing_ignored` is set when the call carried a cost or commission
    /// different from the stored product's; those values were discarded.
    Restocked { quantity: i64, pricing_ignored: bool },
}

impl RestockOutcome {
    /// Quantity on hand after the operation.
    pub fn quantity(&self) -> i64 {
        match self {
            RestockOutcome::Registered { quantity } | RestockOutcome::Restocked { quantity, .. } => {
                *quantity
            }
        }
    }
}

// =============================================================================
// Stock Ledger
// =============================================================================

/// Owns every stock entry and the posted invoice history.
#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    entries: BTreeMap<ProductKey, StockEntry>,
    invoices: InvoiceHistory,
}

impl StockLedger {
    pub fn new() -> Self {
        StockLedger::default()
    }

    /// Registers a new product or adds stock to an existing one.
    ///
    /// The product fields are only validated when a new entry is created;
    /// a restock of a known name never consults them for pricing.
    pub fn register_or_restock(
        &mut self,
        name: &str,
        category: &str,
        purchase_cost: Money,
        commission: Money,
        quantity: i64,
    ) -> CoreResult<RestockOutcome> {
        validate_quantity(quantity)?;

        let key = ProductKey::new(name);
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.quantity = entry
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| ValidationError::overflow("quantity"))?;
            let pricing_ignored = entry.product.purchase_cost() != purchase_cost
                || entry.product.commission() != commission;
            return Ok(RestockOutcome::Restocked {
                quantity: entry.quantity,
                pricing_ignored,
            });
        }

        let product = Product::new(name, category, purchase_cost, commission)?;
        self.entries.insert(key, StockEntry { product, quantity });
        Ok(RestockOutcome::Registered { quantity })
    }

    /// [`register_or_restock`](Self::register_or_restock) with the fields of
    /// an existing product.
    pub fn receive(&mut self, product: &Product, quantity: i64) -> CoreResult<RestockOutcome> {
        self.register_or_restock(
            product.name(),
            product.category(),
            product.purchase_cost(),
            product.commission(),
            quantity,
        )
    }

    /// Removes stock if enough is on hand.
    ///
    /// Returns `false` and leaves the ledger untouched when the quantity is
    /// not positive, the product is unknown, or stock would go negative.
    pub fn decrease(&mut self, name: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return false;
        }

        match self.entries.get_mut(&ProductKey::new(name)) {
            Some(entry) if quantity <= entry.quantity => {
                entry.quantity -= quantity;
                true
            }
            _ => false,
        }
    }

    /// True iff the product is registered and has at least `quantity` on hand.
    pub fn has_available(&self, name: &str, quantity: i64) -> bool {
        self.entries
            .get(&ProductKey::new(name))
            .is_some_and(|entry| entry.quantity >= quantity)
    }

    /// The product registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&Product> {
        self.entries.get(&ProductKey::new(name)).map(StockEntry::product)
    }

    /// Quantity on hand for `name`.
    pub fn quantity_of(&self, name: &str) -> Option<i64> {
        self.entries.get(&ProductKey::new(name)).map(StockEntry::quantity)
    }

    /// All entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = &StockEntry> {
        self.entries.values()
    }

    /// Entries whose name or category contains `criterion`, ignoring case.
    pub fn search<'a>(&'a self, criterion: &str) -> impl Iterator<Item = &'a StockEntry> + 'a {
        let needle = criterion.trim().to_lowercase();
        self.entries.values().filter(move |entry| {
            entry.product.name().to_lowercase().contains(&needle)
                || entry.product.category().to_lowercase().contains(&needle)
        })
    }

    /// One export row per entry, in key order.
    pub fn export_rows(&self) -> impl Iterator<Item = StockExportRow> + '_ {
        self.entries.values().map(|entry| StockExportRow {
            name: entry.product.name().to_string(),
            category: entry.product.category().to_string(),
            purchase_cost: entry.product.purchase_cost(),
            stock: entry.quantity,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoices posted into this ledger, oldest first.
    pub fn invoice_history(&self) -> &InvoiceHistory {
        &self.invoices
    }

    pub(crate) fn invoice_history_mut(&mut self) -> &mut InvoiceHistory {
        &mut self.invoices
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pesos(value: i64) -> Money {
        Money::from_pesos(value)
    }

    fn ledger_with_gas() -> StockLedger {
        let mut ledger = StockLedger::new();
        ledger
            .register_or_restock("Gas 5kg", "gas", pesos(10_000), pesos(1_000), 10)
            .unwrap();
        ledger
            .register_or_restock("Gas 5kg", "gas", pesos(12_000), pesos(2_000), 5)
            .unwrap();
        ledger
    }

    #[test]
    fn test_restock_keeps_first_pricing() {
        let ledger = ledger_with_gas();

        assert_eq!(ledger.quantity_of("gas 5kg"), Some(15));
        let product = ledger.lookup("GAS 5KG").unwrap();
        assert_eq!(product.purchase_cost().pesos(), 10_000);
        assert_eq!(product.sale_price().pesos(), 11_000);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_restock_reports_ignored_pricing() {
        let mut ledger = StockLedger::new();
        let first = ledger
            .register_or_restock("Gas 5kg", "gas", pesos(10_000), pesos(1_000), 10)
            .unwrap();
        assert_eq!(first, RestockOutcome::Registered { quantity: 10 });

        let same = ledger
            .register_or_restock("gas 5kg", "gas", pesos(10_000), pesos(1_000), 1)
            .unwrap();
        assert_eq!(
            same,
            RestockOutcome::Restocked {
                quantity: 11,
                pricing_ignored: false
            }
        );

        let different = ledger
            .register_or_restock("gas 5kg", "gas", pesos(9_000), pesos(1_000), 1)
            .unwrap();
        assert_eq!(
            different,
            RestockOutcome::Restocked {
                quantity: 12,
                pricing_ignored: true
            }
        );
    }

    #[test]
    fn test_register_rejects_non_positive_quantity() {
        let mut ledger = ledger_with_gas();

        let err = ledger
            .register_or_restock("Gas 5kg", "gas", pesos(10_000), pesos(1_000), 0)
            .unwrap_err();
        assert_eq!(err, ValidationError::must_be_positive("quantity", 0));
        assert!(ledger
            .register_or_restock("Regulador", "accesorio", pesos(5_000), pesos(500), -2)
            .is_err());

        assert_eq!(ledger.quantity_of("gas 5kg"), Some(15));
        assert!(ledger.lookup("regulador").is_none());
    }

    #[test]
    fn test_restock_past_max_leaves_stock() {
        let mut ledger = StockLedger::new();
        ledger
            .register_or_restock("Gas 5kg", "gas", pesos(10_000), pesos(1_000), i64::MAX)
            .unwrap();

        let err = ledger
            .register_or_restock("Gas 5kg", "gas", pesos(10_000), pesos(1_000), 1)
            .unwrap_err();
        assert_eq!(err, ValidationError::overflow("quantity"));
        assert_eq!(ledger.quantity_of("gas 5kg"), Some(i64::MAX));
    }

    #[test]
    fn test_register_rejects_invalid_new_product() {
        let mut ledger = StockLedger::new();
        assert!(ledger
            .register_or_restock("Gas 5kg", "gas", pesos(0), pesos(0), 3)
            .is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_decrease_never_goes_negative() {
        let mut ledger = ledger_with_gas();

        assert!(!ledger.decrease("gas 5kg", 20));
        assert_eq!(ledger.quantity_of("gas 5kg"), Some(15));

        assert!(!ledger.decrease("gas 5kg", 0));
        assert!(!ledger.decrease("gas 5kg", -1));
        assert!(!ledger.decrease("gas 45kg", 1));

        assert!(ledger.decrease("Gas 5KG", 15));
        assert_eq!(ledger.quantity_of("gas 5kg"), Some(0));
        assert!(!ledger.decrease("gas 5kg", 1));
    }

    #[test]
    fn test_has_available() {
        let ledger = ledger_with_gas();

        assert!(ledger.has_available("gas 5kg", 15));
        assert!(!ledger.has_available("gas 5kg", 16));
        assert!(ledger.has_available("gas 5kg", 0));
        assert!(!ledger.has_available("gas 11kg", 0));
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let mut ledger = ledger_with_gas();
        ledger
            .register_or_restock("Regulador", "accesorio", pesos(5_000), pesos(500), 4)
            .unwrap();

        let names: Vec<&str> = ledger.search("GAS").map(|e| e.product().name()).collect();
        assert_eq!(names, vec!["Gas 5kg"]);

        let names: Vec<&str> = ledger.search("acces").map(|e| e.product().name()).collect();
        assert_eq!(names, vec!["Regulador"]);

        assert_eq!(ledger.search("nada").count(), 0);
        assert_eq!(ledger.entries().count(), 2);
    }

    #[test]
    fn test_export_rows() {
        let mut ledger = ledger_with_gas();
        ledger
            .register_or_restock("Regulador", "accesorio", pesos(5_000), pesos(500), 4)
            .unwrap();

        let rows: Vec<StockExportRow> = ledger.export_rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Gas 5kg");
        assert_eq!(rows[0].purchase_cost.pesos(), 10_000);
        assert_eq!(rows[0].stock, 15);
        assert_eq!(rows[1].category, "accesorio");
    }
}
