//! # Purchasing Book
//!
//! Purchase orders issued this session and the invoices that brought stock
//! in. Posted invoices live in the ledger's invoice history, so the book
//! only keeps orders itself.
//!
//! ## Receiving Stock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Purchasing Flow                                  │
//! │                                                                         │
//! │  add_order(order)                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  invoice_order(order id, raw number)                                    │
//! │       │  number sanitized ([A-Za-z0-9-], at most 25 chars)              │
//! │       │  empty number ──────────► InvalidInvoiceNumber                  │
//! │       │  unknown order ─────────► OrderNotFound                         │
//! │       ▼                                                                 │
//! │  post_invoice(invoice) ── one write lock ──► StockLedger                │
//! │       │                                      + invoice history          │
//! │       ▼                                                                 │
//! │  PostingOutcome::Posted / AlreadyPosted                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock};

use depot_core::validation::sanitize_invoice_number;
use depot_core::{PostingOutcome, ProductReceipt, PurchaseInvoice, PurchaseOrder};
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::state::LedgerState;

#[derive(Debug, Clone)]
pub struct PurchasingBook {
    ledger: LedgerState,
    orders: Arc<RwLock<Vec<PurchaseOrder>>>,
}

impl PurchasingBook {
    pub fn new(ledger: LedgerState) -> Self {
        PurchasingBook {
            ledger,
            orders: Arc::default(),
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub fn add_order(&self, order: PurchaseOrder) {
        info!(
            order_id = %order.id(),
            supplier = %order.supplier(),
            lines = order.items().len(),
            total = ?order.total_estimated().ok(),
            "Purchase order added"
        );
        self.orders.write().expect("Orders lock poisoned").push(order);
    }

    /// Order by id, ignoring case.
    pub fn find_order(&self, id: &str) -> Option<PurchaseOrder> {
        self.orders
            .read()
            .expect("Orders lock poisoned")
            .iter()
            .find(|order| order.id().eq_ignore_ascii_case(id.trim()))
            .cloned()
    }

    pub fn orders(&self) -> Vec<PurchaseOrder> {
        self.orders.read().expect("Orders lock poisoned").clone()
    }

    // =========================================================================
    // Invoices
    // =========================================================================

    /// Opens an ad hoc invoice under a sanitized number.
    pub fn new_invoice(&self, raw_number: &str, supplier: &str) -> StoreResult<PurchaseInvoice> {
        Ok(PurchaseInvoice::new(clean_number(raw_number)?, supplier))
    }

    /// Materializes the invoice for an order and posts it.
    pub fn invoice_order(&self, order_id: &str, raw_number: &str) -> StoreResult<PurchaseInvoice> {
        let number = clean_number(raw_number)?;
        let order = self
            .find_order(order_id)
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;

        let mut invoice = order.materialize_invoice(number);
        self.post_invoice(&mut invoice)?;
        Ok(invoice)
    }

    /// Receives the invoice's lines into stock.
    pub fn post_invoice(&self, invoice: &mut PurchaseInvoice) -> StoreResult<PostingOutcome> {
        let outcome = self.ledger.with_ledger_mut(|ledger| {
            for line in invoice.items() {
                let drifted = ledger.lookup(line.product.name()).is_some_and(|stored| {
                    stored.purchase_cost() != line.product.purchase_cost()
                        || stored.commission() != line.product.commission()
                });
                if drifted {
                    warn!(
                        invoice = %invoice.number(),
                        product = %line.product.name(),
                        "Invoice pricing differs from stored product; keeping original price"
                    );
                }
            }
            invoice.post_to(ledger)
        })?;

        match outcome {
            PostingOutcome::Posted { lines, units } => {
                info!(
                    invoice = %invoice.number(),
                    supplier = %invoice.supplier(),
                    lines,
                    units,
                    total = ?invoice.total_amount().ok(),
                    "Purchase invoice posted"
                );
            }
            PostingOutcome::AlreadyPosted => {
                warn!(invoice = %invoice.number(), "Invoice already posted; stock unchanged");
            }
        }
        Ok(outcome)
    }

    /// Posted invoice by number, ignoring case.
    pub fn find_invoice(&self, number: &str) -> Option<PurchaseInvoice> {
        self.ledger
            .with_ledger(|ledger| ledger.invoice_history().find_by_number(number.trim()).cloned())
    }

    /// Posted invoices, oldest first.
    pub fn invoices(&self) -> Vec<PurchaseInvoice> {
        self.ledger
            .with_ledger(|ledger| ledger.invoice_history().iter().cloned().collect())
    }

    pub fn receipts_for_product(&self, name: &str) -> Vec<ProductReceipt> {
        self.ledger
            .with_ledger(|ledger| ledger.invoice_history().receipts_for_product(name))
    }
}

fn clean_number(raw: &str) -> StoreResult<String> {
    let number = sanitize_invoice_number(raw);
    if number.is_empty() {
        return Err(StoreError::InvalidInvoiceNumber(raw.to_string()));
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{Money, Product};

    fn gas(cost: i64) -> Product {
        Product::new("Gas 45kg", "gas", Money::from_pesos(cost), Money::from_pesos(8_000)).unwrap()
    }

    fn book_with_order() -> (PurchasingBook, LedgerState) {
        let ledger = LedgerState::new();
        let book = PurchasingBook::new(ledger.clone());

        let mut order = PurchaseOrder::new("OC-7", "Abastible");
        order.add_item(gas(60_000), 4);
        book.add_order(order);
        (book, ledger)
    }

    #[test]
    fn test_invoice_order_receives_stock() {
        let (book, ledger) = book_with_order();

        let invoice = book.invoice_order("oc-7", "F 00/12").unwrap();
        assert_eq!(invoice.number(), "F0012");
        assert_eq!(invoice.order_id(), Some("OC-7"));
        assert!(invoice.is_posted());
        assert_eq!(ledger.quantity_of("gas 45kg"), Some(4));

        assert_eq!(book.find_invoice("f0012").unwrap().supplier(), "Abastible");
        let receipts = book.receipts_for_product("GAS 45KG");
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].quantity, 4);
    }

    #[test]
    fn test_invoice_order_errors() {
        let (book, ledger) = book_with_order();

        assert!(matches!(
            book.invoice_order("OC-8", "F1"),
            Err(StoreError::OrderNotFound(_))
        ));
        assert!(matches!(
            book.invoice_order("OC-7", " / "),
            Err(StoreError::InvalidInvoiceNumber(_))
        ));
        assert!(ledger.quantity_of("gas 45kg").is_none());
        assert!(book.invoices().is_empty());
    }

    #[test]
    fn test_post_twice_is_noop() {
        let (book, ledger) = book_with_order();

        let mut invoice = book.new_invoice("F-1", "Lipigas").unwrap();
        invoice.add_item(gas(60_000), 2);

        let first = book.post_invoice(&mut invoice).unwrap();
        assert_eq!(first, PostingOutcome::Posted { lines: 1, units: 2 });
        assert_eq!(book.post_invoice(&mut invoice).unwrap(), PostingOutcome::AlreadyPosted);

        assert_eq!(ledger.quantity_of("gas 45kg"), Some(2));
        assert_eq!(book.invoices().len(), 1);
    }

    #[test]
    fn test_invalid_line_rejects_whole_invoice() {
        let (book, ledger) = book_with_order();

        let mut invoice = book.new_invoice("F-2", "Lipigas").unwrap();
        invoice.add_item(gas(60_000), 3);
        invoice.add_item(gas(60_000), 0);

        assert!(matches!(
            book.post_invoice(&mut invoice),
            Err(StoreError::Validation(_))
        ));
        assert!(!invoice.is_posted());
        assert!(ledger.quantity_of("gas 45kg").is_none());
    }

    #[test]
    fn test_drifted_pricing_keeps_stored_product() {
        let (book, ledger) = book_with_order();
        book.invoice_order("OC-7", "F-1").unwrap();

        let mut invoice = book.new_invoice("F-2", "Lipigas").unwrap();
        invoice.add_item(gas(65_000), 1);
        book.post_invoice(&mut invoice).unwrap();

        assert_eq!(ledger.quantity_of("gas 45kg"), Some(5));
        assert_eq!(ledger.lookup("gas 45kg").unwrap().purchase_cost().pesos(), 60_000);
    }
}
