//! # Purchasing
//!
//! Purchase orders, purchase invoices and the history of posted invoices.
//!
//! ## Order → Invoice → Ledger
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  PurchaseOrder "O001" (supplier, issue date)                            │
//! │   ├── add_item(Gas 5kg, 2)                                              │
//! │   └── add_item(Regulador, 3)                                            │
//! │          │                                                              │
//! │          │ materialize_invoice("F001")   order is not modified          │
//! │          ▼                                                              │
//! │  PurchaseInvoice "F001" (same supplier, copied lines, order_id O001)    │
//! │          │                                                              │
//! │          │ post_to(&mut ledger)                                         │
//! │          ▼                                                              │
//! │  StockLedger  ── register_or_restock per line                           │
//! │   └── InvoiceHistory ── find_by_number / receipts_for_product           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invoices can also be keyed in by hand without an order.

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::error::{CoreResult, ValidationError};
use crate::ledger::StockLedger;
use crate::money::Money;
use crate::types::{Product, ProductKey};
use crate::validation::validate_quantity;

// =============================================================================
// Purchase Line
// =============================================================================

/// One `(product, quantity)` pair on an order or invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseLine {
    pub product: Product,
    pub quantity: i64,
}

impl PurchaseLine {
    /// Purchase cost × quantity.
    pub fn amount(&self) -> CoreResult<Money> {
        self.product
            .purchase_cost()
            .checked_mul_quantity(self.quantity)
            .ok_or_else(|| ValidationError::overflow("line amount"))
    }
}

fn lines_total(lines: &[PurchaseLine]) -> CoreResult<Money> {
    lines.iter().try_fold(Money::zero(), |total, line| {
        total
            .checked_add(line.amount()?)
            .ok_or_else(|| ValidationError::overflow("total"))
    })
}

// =============================================================================
// Purchase Order
// =============================================================================

/// A purchase order issued to a supplier.
///
/// Lines are only ever appended; quantities are not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseOrder {
    id: String,
    supplier: String,
    issue_date: NaiveDate,
    items: Vec<PurchaseLine>,
}

impl PurchaseOrder {
    /// Opens an order dated today.
    pub fn new(id: impl Into<String>, supplier: impl Into<String>) -> Self {
        PurchaseOrder::dated(id, supplier, Local::now().date_naive())
    }

    /// Opens an order with an explicit issue date.
    pub fn dated(id: impl Into<String>, supplier: impl Into<String>, issue_date: NaiveDate) -> Self {
        PurchaseOrder {
            id: id.into(),
            supplier: supplier.into(),
            issue_date,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn items(&self) -> &[PurchaseLine] {
        &self.items
    }

    pub fn add_item(&mut self, product: Product, quantity: i64) {
        self.items.push(PurchaseLine { product, quantity });
    }

    /// Σ purchase cost × quantity over the lines.
    pub fn total_estimated(&self) -> CoreResult<Money> {
        lines_total(&self.items)
    }

    /// Builds the invoice for this order.
    ///
    /// The invoice gets the order's supplier, a copy of its lines and a
    /// reference back to the order id.
    pub fn materialize_invoice(&self, number: impl Into<String>) -> PurchaseInvoice {
        PurchaseInvoice {
            number: number.into(),
            issued_at: Local::now(),
            supplier: self.supplier.clone(),
            items: self.items.clone(),
            order_id: Some(self.id.clone()),
            posted_at: None,
        }
    }
}

// =============================================================================
// Purchase Invoice
// =============================================================================

/// What happened when an invoice was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingOutcome {
    /// Every line was received into the ledger.
    Posted { lines: usize, units: i64 },
    /// The invoice had been posted before; the ledger was not touched.
    AlreadyPosted,
}

/// A supplier invoice that brings stock in.
///
/// Invoice numbers are not checked for uniqueness; that is up to whoever
/// issues them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseInvoice {
    number: String,
    issued_at: DateTime<Local>,
    supplier: String,
    items: Vec<PurchaseLine>,
    order_id: Option<String>,
    posted_at: Option<DateTime<Local>>,
}

impl PurchaseInvoice {
    /// An invoice keyed in by hand, not tied to any order.
    pub fn new(number: impl Into<String>, supplier: impl Into<String>) -> Self {
        PurchaseInvoice {
            number: number.into(),
            issued_at: Local::now(),
            supplier: supplier.into(),
            items: Vec::new(),
            order_id: None,
            posted_at: None,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn issued_at(&self) -> DateTime<Local> {
        self.issued_at
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn items(&self) -> &[PurchaseLine] {
        &self.items
    }

    /// Id of the order this invoice was materialized from.
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    pub fn posted_at(&self) -> Option<DateTime<Local>> {
        self.posted_at
    }

    pub fn is_posted(&self) -> bool {
        self.posted_at.is_some()
    }

    pub fn add_item(&mut self, product: Product, quantity: i64) {
        self.items.push(PurchaseLine { product, quantity });
    }

    /// Σ purchase cost × quantity over the lines.
    pub fn total_amount(&self) -> CoreResult<Money> {
        lines_total(&self.items)
    }

    /// Receives every line into `ledger` and files the invoice in the
    /// ledger's invoice history.
    ///
    /// All line quantities, and the stock each product would reach, are
    /// checked before anything is written, so a bad line rejects the whole
    /// invoice and the ledger stays as it was. A second call on the same
    /// invoice returns [`PostingOutcome::AlreadyPosted`] without touching
    /// stock.
    pub fn post_to(&mut self, ledger: &mut StockLedger) -> CoreResult<PostingOutcome> {
        if self.is_posted() {
            return Ok(PostingOutcome::AlreadyPosted);
        }

        let mut units: i64 = 0;
        let mut incoming: HashMap<ProductKey, i64> = HashMap::new();
        for line in &self.items {
            validate_quantity(line.quantity)?;
            units = units
                .checked_add(line.quantity)
                .ok_or_else(|| ValidationError::overflow("invoice units"))?;
            *incoming.entry(line.product.key()).or_insert(0) += line.quantity;
        }

        for (key, quantity) in &incoming {
            let on_hand = ledger.quantity_of(key.as_str()).unwrap_or(0);
            if on_hand.checked_add(*quantity).is_none() {
                return Err(ValidationError::overflow("quantity"));
            }
        }

        for line in &self.items {
            ledger.receive(&line.product, line.quantity)?;
        }

        self.posted_at = Some(Local::now());
        ledger.invoice_history_mut().record(self.clone());

        Ok(PostingOutcome::Posted {
            lines: self.items.len(),
            units,
        })
    }
}

// =============================================================================
// Invoice History
// =============================================================================

/// One receipt of a product on a posted invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductReceipt {
    pub invoice_number: String,
    pub issued_at: DateTime<Local>,
    pub quantity: i64,
}

/// Posted invoices, oldest first.
#[derive(Debug, Clone, Default)]
pub struct InvoiceHistory {
    invoices: Vec<PurchaseInvoice>,
}

impl InvoiceHistory {
    pub fn record(&mut self, invoice: PurchaseInvoice) {
        self.invoices.push(invoice);
    }

    /// First invoice whose number matches, ignoring case.
    pub fn find_by_number(&self, number: &str) -> Option<&PurchaseInvoice> {
        self.invoices
            .iter()
            .find(|invoice| invoice.number.eq_ignore_ascii_case(number))
    }

    /// Every line, across all invoices, that received `product_name`.
    pub fn receipts_for_product(&self, product_name: &str) -> Vec<ProductReceipt> {
        let key = ProductKey::new(product_name);
        self.invoices
            .iter()
            .flat_map(|invoice| {
                invoice
                    .items
                    .iter()
                    .filter(|line| line.product.key() == key)
                    .map(move |line| ProductReceipt {
                        invoice_number: invoice.number.clone(),
                        issued_at: invoice.issued_at,
                        quantity: line.quantity,
                    })
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PurchaseInvoice> {
        self.invoices.iter()
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn gas_5kg() -> Product {
        Product::new("Gas 5kg", "gas", Money::from_pesos(10_000), Money::from_pesos(1_000)).unwrap()
    }

    fn regulador() -> Product {
        Product::new("Regulador", "accesorio", Money::from_pesos(5_000), Money::from_pesos(500))
            .unwrap()
    }

    fn sample_order() -> PurchaseOrder {
        let mut order = PurchaseOrder::new("O001", "Abastible");
        order.add_item(gas_5kg(), 2);
        order.add_item(regulador(), 3);
        order
    }

    #[test]
    fn test_order_total_estimated() {
        let order = sample_order();
        assert_eq!(order.total_estimated().unwrap().pesos(), 2 * 10_000 + 3 * 5_000);
    }

    #[test]
    fn test_invoice_total_amount() {
        let mut invoice = PurchaseInvoice::new("F001", "Proveedor");
        invoice.add_item(gas_5kg(), 2);
        invoice.add_item(regulador(), 3);
        assert_eq!(invoice.total_amount().unwrap().pesos(), 35_000);
        assert!(invoice.order_id().is_none());
    }

    #[test]
    fn test_materialized_invoice_matches_order() {
        let order = sample_order();
        let invoice = order.materialize_invoice("F001");

        assert_eq!(invoice.total_amount(), order.total_estimated());
        assert_eq!(invoice.items(), order.items());
        assert_eq!(invoice.supplier(), "Abastible");
        assert_eq!(invoice.order_id(), Some("O001"));
        assert_eq!(order.items().len(), 2);
    }

    #[test]
    fn test_order_accepts_any_quantity() {
        let mut order = PurchaseOrder::new("O002", "Lipigas");
        order.add_item(gas_5kg(), 0);
        order.add_item(gas_5kg(), -1);
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total_estimated().unwrap().pesos(), -10_000);
    }

    #[test]
    fn test_posting_fills_empty_ledger() {
        let mut ledger = StockLedger::new();
        let mut invoice = sample_order().materialize_invoice("F001");

        let outcome = invoice.post_to(&mut ledger).unwrap();

        assert_eq!(outcome, PostingOutcome::Posted { lines: 2, units: 5 });
        assert_eq!(ledger.quantity_of("Gas 5kg"), Some(2));
        assert_eq!(ledger.quantity_of("Regulador"), Some(3));

        let history = ledger.invoice_history();
        assert_eq!(history.find_by_number("f001").map(|i| i.number()), Some("F001"));
        let receipts = history.receipts_for_product("GAS 5KG");
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].invoice_number, "F001");
        assert_eq!(receipts[0].quantity, 2);
    }

    #[test]
    fn test_second_posting_is_ignored() {
        let mut ledger = StockLedger::new();
        let mut invoice = sample_order().materialize_invoice("F001");

        invoice.post_to(&mut ledger).unwrap();
        let again = invoice.post_to(&mut ledger).unwrap();

        assert_eq!(again, PostingOutcome::AlreadyPosted);
        assert_eq!(ledger.quantity_of("Gas 5kg"), Some(2));
        assert_eq!(ledger.invoice_history().len(), 1);
    }

    #[test]
    fn test_invalid_line_rejects_whole_invoice() {
        let mut ledger = StockLedger::new();
        let mut invoice = PurchaseInvoice::new("F002", "Proveedor");
        invoice.add_item(gas_5kg(), 4);
        invoice.add_item(regulador(), 0);

        assert!(invoice.post_to(&mut ledger).is_err());
        assert!(ledger.is_empty());
        assert!(ledger.invoice_history().is_empty());
        assert!(!invoice.is_posted());
    }

    #[test]
    fn test_order_total_overflow_is_reported() {
        let mut order = PurchaseOrder::new("O003", "Lipigas");
        order.add_item(gas_5kg(), i64::MAX / 1000);
        assert_eq!(
            order.total_estimated().unwrap_err(),
            ValidationError::overflow("line amount")
        );

        let mut order = PurchaseOrder::new("O004", "Lipigas");
        order.add_item(gas_5kg(), i64::MAX / 10_000);
        order.add_item(gas_5kg(), i64::MAX / 10_000);
        assert_eq!(order.total_estimated().unwrap_err(), ValidationError::overflow("total"));
    }

    #[test]
    fn test_posting_past_max_stock_rejects_whole_invoice() {
        let mut ledger = StockLedger::new();
        let mut first = PurchaseInvoice::new("F001", "Proveedor");
        first.add_item(regulador(), 5);
        first.post_to(&mut ledger).unwrap();
        let mut full = PurchaseInvoice::new("F002", "Proveedor");
        full.add_item(gas_5kg(), i64::MAX - 1);
        full.post_to(&mut ledger).unwrap();

        let mut second = PurchaseInvoice::new("F003", "Proveedor");
        second.add_item(regulador(), 1);
        second.add_item(gas_5kg(), 1);
        second.add_item(gas_5kg(), 1);
        assert_eq!(
            second.post_to(&mut ledger).unwrap_err(),
            ValidationError::overflow("quantity")
        );

        assert_eq!(ledger.quantity_of("regulador"), Some(5));
        assert_eq!(ledger.quantity_of("gas 5kg"), Some(i64::MAX - 1));
        assert_eq!(ledger.invoice_history().len(), 2);
        assert!(!second.is_posted());
    }

    #[test]
    fn test_posting_units_past_max_rejected() {
        let mut ledger = StockLedger::new();
        let mut invoice = PurchaseInvoice::new("F004", "Proveedor");
        invoice.add_item(gas_5kg(), i64::MAX);
        invoice.add_item(regulador(), 1);

        assert_eq!(
            invoice.post_to(&mut ledger).unwrap_err(),
            ValidationError::overflow("invoice units")
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_receipts_across_invoices() {
        let mut ledger = StockLedger::new();

        let mut first = PurchaseInvoice::new("F001", "Proveedor");
        first.add_item(gas_5kg(), 2);
        first.post_to(&mut ledger).unwrap();

        let mut second = PurchaseInvoice::new("F003", "Proveedor");
        second.add_item(regulador(), 1);
        second.add_item(gas_5kg(), 7);
        second.post_to(&mut ledger).unwrap();

        let receipts = ledger.invoice_history().receipts_for_product("gas 5kg");
        let summary: Vec<(&str, i64)> = receipts
            .iter()
            .map(|r| (r.invoice_number.as_str(), r.quantity))
            .collect();
        assert_eq!(summary, vec![("F001", 2), ("F002", 7)]);
        assert_eq!(ledger.quantity_of("gas 5kg"), Some(9));
        assert!(ledger.invoice_history().find_by_number("F404").is_none());
    }
}
