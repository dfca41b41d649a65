//! # depot-core: Inventory & Transaction Engine
//!
//! Pricing rule, discount resolution, stock ledger and the purchase/sale
//! transactions that compose them. No I/O happens in this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Depot Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/backoffice (binary)                        │   │
//! │  │      config, logging, wiring, seed / import / report            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    depot-store (services)                       │   │
//! │  │   locked ledger & histories, customers, CSV, POS, purchasing    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ depot-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │ discount │ │  ledger  │ │ purchase │          │   │
//! │  │   │ Product  │ │ Catalog  │ │  Stock   │ │ Order    │          │   │
//! │  │   │ Channel  │ │ fail-open│ │  Entry   │ │ Invoice  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐                        │   │
//! │  │   │   sale   │ │ history  │ │  money   │                        │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘                        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • SINGLE WRITER PER INSTANCE              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - whole-peso `Money`
//! - [`types`] - `Product`, `ProductKey`, `Channel`
//! - [`customer`] - customer record and the registry lookup seam
//! - [`discount`] - `DiscountCatalog` and the fail-open pick
//! - [`ledger`] - `StockLedger`
//! - [`purchase`] - purchase orders, invoices, invoice history
//! - [`sale`] - `Sale` and its derived totals
//! - [`history`] - `SalesHistory` and export rows
//! - [`validation`], [`error`] - field rules and `ValidationError`
//!
//! ## Example Usage
//!
//! ```rust
//! use depot_core::{Channel, CustomerRef, DiscountCatalog, Money, Sale, StockLedger};
//!
//! let mut ledger = StockLedger::new();
//! ledger.register_or_restock("Gas 15kg", "gas", Money::from_pesos(25_000), Money::from_pesos(3_000), 4)?;
//!
//! let catalog = DiscountCatalog::standard();
//! let product = ledger.lookup("gas 15kg").cloned().expect("registered above");
//! let discount = catalog.resolve(&product, "local", 1);
//!
//! let customer = CustomerRef { tax_id: "GEN1".into(), name: "Ana".into() };
//! let mut sale = Sale::new(Channel::Local, customer);
//! sale.add_line_item(product, discount.amount());
//! assert!(ledger.decrease("gas 15kg", 1));
//!
//! assert_eq!(sale.net_total().pesos(), 22_000);
//! # Ok::<(), depot_core::ValidationError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod customer;
pub mod discount;
pub mod error;
pub mod history;
pub mod ledger;
pub mod money;
pub mod purchase;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use customer::{Customer, CustomerLookup, CustomerRef};
pub use discount::{AppliedDiscount, DiscountCatalog};
pub use error::{CoreResult, ValidationError};
pub use history::{SaleExportRow, SalesHistory};
pub use ledger::{RestockOutcome, StockEntry, StockExportRow, StockLedger};
pub use money::Money;
pub use purchase::{
    InvoiceHistory, PostingOutcome, ProductReceipt, PurchaseInvoice, PurchaseLine, PurchaseOrder,
};
pub use sale::{Sale, SaleLine, SaleSummary};
pub use types::{Channel, Product, ProductKey};
