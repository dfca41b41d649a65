//! # Sale
//!
//! A point-of-sale transaction on one channel for one customer.
//!
//! ## Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lines: [(Gas 11kg $11500, discount $1000), (Gas 5kg $5500, $0)]        │
//! │                                                                         │
//! │  gross_total()    = Σ unit price       = 17000                          │
//! │  total_discount() = Σ discount         =  1000                          │
//! │  net_total()      = gross - discount   = 16000                          │
//! │                                                                         │
//! │  Nothing is cached: every call folds over the lines again, so the       │
//! │  totals always agree with the lines.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount stored on a line was resolved by the caller against the
//! discount catalog; a sale never looks discounts up itself.

use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

use crate::customer::CustomerRef;
use crate::money::Money;
use crate::types::{Channel, Product};

/// One unit sold, with the discount chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleLine {
    pub product: Product,
    pub discount: Money,
}

impl SaleLine {
    pub fn unit_price(&self) -> Money {
        self.product.sale_price()
    }

    /// Unit price minus discount.
    pub fn line_total(&self) -> Money {
        self.unit_price() - self.discount
    }
}

/// A sale transaction.
///
/// Lines are append-only. Once the sale is recorded in the sales history it
/// is treated as closed by convention; the type itself does not lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    id: Uuid,
    channel: Channel,
    customer: CustomerRef,
    timestamp: DateTime<Local>,
    lines: Vec<SaleLine>,
}

impl Sale {
    /// Opens a sale stamped with the current time.
    pub fn new(channel: Channel, customer: CustomerRef) -> Self {
        Sale::at(channel, customer, Local::now())
    }

    /// Opens a sale with an explicit timestamp.
    pub fn at(channel: Channel, customer: CustomerRef, timestamp: DateTime<Local>) -> Self {
        Sale {
            id: Uuid::new_v4(),
            channel,
            customer,
            timestamp,
            lines: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn customer(&self) -> &CustomerRef {
        &self.customer
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends one unit of `product` with an already-resolved discount.
    pub fn add_line_item(&mut self, product: Product, discount: Money) {
        self.lines.push(SaleLine { product, discount });
    }

    /// Σ sale price over the lines.
    pub fn gross_total(&self) -> Money {
        self.lines.iter().map(SaleLine::unit_price).sum()
    }

    /// Σ discount over the lines.
    pub fn total_discount(&self) -> Money {
        self.lines.iter().map(|line| line.discount).sum()
    }

    /// Gross total minus total discount.
    pub fn net_total(&self) -> Money {
        self.gross_total() - self.total_discount()
    }

    /// Totals snapshot for display.
    pub fn summary(&self) -> SaleSummary {
        SaleSummary {
            id: self.id,
            channel: self.channel,
            customer: self.customer.clone(),
            timestamp: self.timestamp,
            line_count: self.lines.len(),
            gross_total: self.gross_total(),
            total_discount: self.total_discount(),
            net_total: self.net_total(),
        }
    }
}

/// Derived totals of a sale at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleSummary {
    pub id: Uuid,
    pub channel: Channel,
    pub customer: CustomerRef,
    pub timestamp: DateTime<Local>,
    pub line_count: usize,
    pub gross_total: Money,
    pub total_discount: Money,
    pub net_total: Money,
}
