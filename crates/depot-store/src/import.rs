//! # Customer Spreadsheet Import
//!
//! Loads customers from a sheet of rows. Any row source works; the file
//! reader takes the first sheet of a workbook (`.xlsx`, `.xls`, `.ods`)
//! or a sheet saved as CSV.
//!
//! ## Sheet Layout
//! ```text
//! ┌──────────────┬──────────────┬──────────────┐
//! │   column 0   │   column 1   │   column 2   │
//! ├──────────────┼──────────────┼──────────────┤
//! │ header row (always skipped)                │  row 0
//! ├──────────────┼──────────────┼──────────────┤
//! │ name         │ (ignored)    │ address      │  row i → tax id "GEN{i}"
//! └──────────────┴──────────────┴──────────────┘
//! ```
//!
//! Row indexes are absolute sheet positions: a blank row is not read but
//! still counts. Phone is left empty. Rows with an empty name or address
//! are skipped.

use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use depot_core::Customer;
use tracing::{debug, info};

use crate::customers::CustomerRegistry;
use crate::error::{StoreError, StoreResult};

const HEADER_ROW: usize = 0;
const NAME_COLUMN: usize = 0;
const ADDRESS_COLUMN: usize = 2;
const GENERATED_TAX_ID_PREFIX: &str = "GEN";
const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// One sheet row with its absolute index.
pub type SheetRow = (usize, Vec<String>);

/// Counts from one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    /// Rows with a missing name or address.
    pub skipped: usize,
    /// Rows whose generated tax id was already registered.
    pub duplicates: usize,
}

/// Builds customers from `(row index, cells)` pairs.
///
/// Row 0 is the header. For an in-memory table, `rows.iter().enumerate()`
/// gives the indexes.
pub fn customers_from_rows<I, R, C>(rows: I) -> (Vec<Customer>, usize)
where
    I: IntoIterator<Item = (usize, R)>,
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut customers = Vec::new();
    let mut skipped = 0;

    for (index, row) in rows.into_iter().filter(|(index, _)| *index != HEADER_ROW) {
        let row = row.as_ref();
        let cell = |column: usize| row.get(column).map(|c| c.as_ref().trim()).unwrap_or("");

        let name = cell(NAME_COLUMN);
        let address = cell(ADDRESS_COLUMN);
        if name.is_empty() || address.is_empty() {
            debug!(row = index, "Skipping incomplete customer row");
            skipped += 1;
            continue;
        }

        let tax_id = format!("{GENERATED_TAX_ID_PREFIX}{index}");
        customers.push(Customer::new(name, tax_id, "", address));
    }

    (customers, skipped)
}

/// Imports indexed sheet rows into `registry`.
pub fn import_rows<I, R, C>(registry: &CustomerRegistry, rows: I) -> ImportReport
where
    I: IntoIterator<Item = (usize, R)>,
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let (customers, skipped) = customers_from_rows(rows);
    let mut report = ImportReport {
        skipped,
        ..ImportReport::default()
    };

    for customer in customers {
        if registry.register(customer) {
            report.imported += 1;
        } else {
            report.duplicates += 1;
        }
    }

    report
}

// =============================================================================
// Sheet Readers
// =============================================================================

/// Reads every non-blank row of a sheet file, header included.
///
/// Workbooks are picked by extension; anything else is read as CSV.
pub fn read_sheet(path: &Path) -> StoreResult<Vec<SheetRow>> {
    if is_workbook(path) {
        read_workbook(path)
    } else {
        read_csv_sheet(path)
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}

fn read_workbook(path: &Path) -> StoreResult<Vec<SheetRow>> {
    let workbook_error = |source| StoreError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    match workbook.worksheet_range_at(0) {
        Some(range) => Ok(range_rows(&range.map_err(workbook_error)?)),
        None => Ok(Vec::new()),
    }
}

/// Rows of a worksheet range keyed by absolute position.
///
/// The used range may start below row 0 or right of column A; cells are
/// read by absolute coordinates so indexes and columns line up with the
/// sheet. Rows with no content are dropped.
fn range_rows(range: &Range<Data>) -> Vec<SheetRow> {
    let (Some((first_row, _)), Some((last_row, last_column))) = (range.start(), range.end()) else {
        return Vec::new();
    };

    (first_row..=last_row)
        .filter_map(|row| {
            let cells: Vec<String> = (0..=last_column)
                .map(|column| range.get_value((row, column)).map(cell_text).unwrap_or_default())
                .collect();
            let blank = cells.iter().all(|cell| cell.is_empty());
            (!blank).then_some((row as usize, cells))
        })
        .collect()
}

/// Cell text as typed in the sheet; numbers lose their fractional part.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => (*value as i64).to_string(),
        Data::Bool(value) => value.to_string(),
        _ => String::new(),
    }
}

/// Reads a CSV sheet.
///
/// The csv reader drops blank lines, so each row's index comes from the
/// line it started on.
fn read_csv_sheet(path: &Path) -> StoreResult<Vec<SheetRow>> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let index = record
            .position()
            .map_or(rows.len(), |position| position.line().saturating_sub(1) as usize);
        rows.push((index, record.iter().map(str::to_string).collect()));
    }
    Ok(rows)
}

/// Reads a sheet file from disk and imports it.
pub fn import_customers_file(registry: &CustomerRegistry, path: &Path) -> StoreResult<ImportReport> {
    let rows = read_sheet(path)?;
    let report = import_rows(registry, rows);

    info!(
        path = %path.display(),
        imported = report.imported,
        skipped = report.skipped,
        duplicates = report.duplicates,
        "Customer sheet imported"
    );
    Ok(report)
}
