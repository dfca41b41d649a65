//! # Sales History State
//!
//! Completed sales behind a read/write lock. Recording appends; exports read
//! a consistent snapshot of the rows.

use std::sync::{Arc, RwLock};

use depot_core::{Money, Sale, SaleExportRow, SaleSummary, SalesHistory};
use tracing::info;

/// Shared handle to the sales history.
#[derive(Debug, Clone, Default)]
pub struct SalesHistoryState {
    history: Arc<RwLock<SalesHistory>>,
}

impl SalesHistoryState {
    pub fn new() -> Self {
        SalesHistoryState::default()
    }

    /// Runs `f` with read access to the history.
    pub fn with_history<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SalesHistory) -> R,
    {
        let history = self.history.read().expect("Sales history lock poisoned");
        f(&history)
    }

    /// Appends a completed sale and returns its summary.
    pub fn record(&self, sale: Sale) -> SaleSummary {
        let summary = sale.summary();
        self.history
            .write()
            .expect("Sales history lock poisoned")
            .record(sale);

        info!(
            sale_id = %summary.id,
            channel = %summary.channel,
            customer = %summary.customer.tax_id,
            lines = summary.line_count,
            net_total = %summary.net_total,
            "Sale recorded"
        );
        summary
    }

    /// Snapshot of every export row, oldest sale first.
    pub fn export_rows(&self) -> Vec<SaleExportRow> {
        self.with_history(|history| history.export_rows().collect())
    }

    pub fn summaries(&self) -> Vec<SaleSummary> {
        self.with_history(|history| history.sales().iter().map(Sale::summary).collect())
    }

    pub fn net_revenue(&self) -> Money {
        self.with_history(SalesHistory::net_revenue)
    }

    pub fn len(&self) -> usize {
        self.with_history(SalesHistory::len)
    }

    pub fn is_empty(&self) -> bool {
        self.with_history(SalesHistory::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{Channel, CustomerRef, Product};

    fn sale_with_one_line() -> Sale {
        let customer = CustomerRef {
            tax_id: "GEN1".to_string(),
            name: "Ana".to_string(),
        };
        let product = Product::new(
            "Gas 11kg",
            "gas",
            Money::from_pesos(15_000),
            Money::from_pesos(2_000),
        )
        .unwrap();

        let mut sale = Sale::new(Channel::Delivery, customer);
        sale.add_line_item(product, Money::from_pesos(1_500));
        sale
    }

    #[test]
    fn test_record_returns_summary() {
        let state = SalesHistoryState::new();
        let summary = state.record(sale_with_one_line());

        assert_eq!(summary.line_count, 1);
        assert_eq!(summary.net_total.pesos(), 15_500);
        assert_eq!(state.len(), 1);
        assert_eq!(state.net_revenue().pesos(), 15_500);
    }

    #[test]
    fn test_export_rows_snapshot() {
        let state = SalesHistoryState::new();
        assert!(state.is_empty());
        state.record(sale_with_one_line());
        state.record(sale_with_one_line());

        let rows = state.export_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].channel, Channel::Delivery);
        assert_eq!(rows[0].discount.pesos(), 1_500);
        assert_eq!(state.summaries().len(), 2);
    }
}
