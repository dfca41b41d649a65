//! # Sales History
//!
//! Append-only log of completed sales and its flattened export view.
//!
//! ## Export Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  history: [Sale A (2 lines), Sale B (1 line)]                           │
//! │                                                                         │
//! │  export_rows():                                                         │
//! │    A.timestamp, local,    Gas 15kg, 28000, 5500, 22500                  │
//! │    A.timestamp, local,    Gas 5kg,  11000, 2500,  8500                  │
//! │    B.timestamp, delivery, Gas 11kg, 20000, 1500, 18500                  │
//! │                                                                         │
//! │  One row per (sale, line), history order then line order.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::money::Money;
use crate::sale::Sale;
use crate::types::Channel;

/// One exported line: a single unit sold within a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleExportRow {
    pub timestamp: DateTime<Local>,
    pub channel: Channel,
    pub product_name: String,
    pub unit_price: Money,
    pub discount: Money,
    pub line_total: Money,
}

/// Completed sales, oldest first.
#[derive(Debug, Clone, Default)]
pub struct SalesHistory {
    sales: Vec<Sale>,
}

impl SalesHistory {
    pub fn new() -> Self {
        SalesHistory::default()
    }

    /// Appends a sale. Never rejects, never deduplicates.
    pub fn record(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Flattens the history into export rows.
    ///
    /// The iterator borrows the history as it is now and yields each row
    /// once; call again for a fresh pass.
    pub fn export_rows(&self) -> impl Iterator<Item = SaleExportRow> + '_ {
        self.sales.iter().flat_map(|sale| {
            sale.lines().iter().map(move |line| SaleExportRow {
                timestamp: sale.timestamp(),
                channel: sale.channel(),
                product_name: line.product.name().to_string(),
                unit_price: line.unit_price(),
                discount: line.discount,
                line_total: line.line_total(),
            })
        })
    }

    /// Σ net total over every recorded sale.
    pub fn net_revenue(&self) -> Money {
        self.sales.iter().map(Sale::net_total).sum()
    }
}
