//! # Shared State
//!
//! Lock-protected handles over the engine's mutable collections.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shared State Layout                               │
//! │                                                                         │
//! │   LedgerState ──────────► Arc<RwLock<StockLedger>>                      │
//! │                            (stock entries + posted invoice history)     │
//! │                                                                         │
//! │   SalesHistoryState ────► Arc<RwLock<SalesHistory>>                     │
//! │                                                                         │
//! │   CustomerRegistry ─────► Arc<RwLock<BTreeMap<tax id, Customer>>>       │
//! │                                                                         │
//! │   Handles are cheap to clone and all clones see the same data.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod ledger;
mod sales;

pub use ledger::LedgerState;
pub use sales::SalesHistoryState;
