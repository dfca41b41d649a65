//! # CSV Export
//!
//! Tabular exports of the sales history and the stock ledger.
//!
//! ```text
//! sales: FechaHora,TipoVenta,Producto,PrecioUnitario,Descuento,TotalLinea
//! stock: Nombre,Tipo,PrecioCompra,Stock
//! ```
//!
//! Amounts are whole pesos. Rows are snapshotted under the read lock and
//! written after it is released.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use depot_core::{SaleExportRow, StockExportRow};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::state::{LedgerState, SalesHistoryState};

pub const SALES_HEADER: [&str; 6] = [
    "FechaHora",
    "TipoVenta",
    "Producto",
    "PrecioUnitario",
    "Descuento",
    "TotalLinea",
];

pub const STOCK_HEADER: [&str; 4] = ["Nombre", "Tipo", "PrecioCompra", "Stock"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// =============================================================================
// Writers
// =============================================================================

/// Writes sales rows with header. Returns the number of data rows.
pub fn write_sales<W: Write>(writer: W, rows: &[SaleExportRow]) -> StoreResult<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(SALES_HEADER)?;

    for row in rows {
        csv.write_record([
            row.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            row.channel.as_str().to_string(),
            row.product_name.clone(),
            row.unit_price.pesos().to_string(),
            row.discount.pesos().to_string(),
            row.line_total.pesos().to_string(),
        ])?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(rows.len())
}

/// Writes stock rows with header. Returns the number of data rows.
pub fn write_stock<W: Write>(writer: W, rows: &[StockExportRow]) -> StoreResult<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(STOCK_HEADER)?;

    for row in rows {
        csv.write_record([
            row.name.clone(),
            row.category.clone(),
            row.purchase_cost.pesos().to_string(),
            row.stock.to_string(),
        ])?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(rows.len())
}

// =============================================================================
// File Exports
// =============================================================================

pub fn export_sales(history: &SalesHistoryState, path: &Path) -> StoreResult<usize> {
    let rows = history.export_rows();
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let written = write_sales(file, &rows)?;

    info!(path = %path.display(), rows = written, "Sales history exported");
    Ok(written)
}

pub fn export_stock(ledger: &LedgerState, path: &Path) -> StoreResult<usize> {
    let rows: Vec<StockExportRow> = ledger.with_ledger(|l| l.export_rows().collect());
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let written = write_stock(file, &rows)?;

    info!(path = %path.display(), rows = written, "Stock exported");
    Ok(written)
}
