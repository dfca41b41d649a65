//! # Depot Back Office
//!
//! Command-line front for the depot services.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  backoffice seed                 demo stock + sales, CSV exports        │
//! │  backoffice import-customers F   load a customer sheet, list customers  │
//! │  backoffice sell -c ID -p NAME   one sale on demo stock, asks discounts │
//! │  backoffice report               JSON summary of the demo session       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is persisted between runs; every command starts from an empty
//! depot.

mod config;
mod demo;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use depot_core::{Channel, Money, Product};
use depot_store::{export, import, Depot};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::BackofficeConfig;

#[derive(Debug, Parser)]
#[command(name = "backoffice", version, about = "Gas depot back office")]
struct Cli {
    /// Configuration file (defaults to ./backoffice.toml when present)
    #[arg(long, short, global = true, env = "DEPOT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Receive demo stock, ring up demo sales and export both CSVs
    Seed,

    /// Import customers from a workbook (.xlsx) or a sheet saved as CSV
    ImportCustomers {
        file: PathBuf,
    },

    /// Sell from demo stock, choosing each discount on the terminal
    Sell {
        /// Customer tax id
        #[arg(long, short)]
        customer: String,

        /// local or delivery (domicilio)
        #[arg(long, default_value = "local")]
        channel: String,

        #[arg(long, short)]
        product: String,

        #[arg(long, short, default_value_t = 1)]
        quantity: i64,
    },

    /// Print a JSON summary of the demo session
    Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BackofficeConfig::load(cli.config.as_deref())
        .context("Failed to load back office configuration")?;

    init_tracing(&config.log_filter);

    let depot = Depot::new(config.discount_catalog());
    if let Some(file) = startup_customers_file(&config, &cli.command) {
        import::import_customers_file(&depot.customers, file)
            .with_context(|| format!("Failed to import customers from {}", file.display()))?;
    }

    match cli.command {
        Command::Seed => seed(&depot, &config.export_dir),
        Command::ImportCustomers { file } => import_customers(&depot, &file),
        Command::Sell {
            customer,
            channel,
            product,
            quantity,
        } => sell(&depot, &customer, &channel, &product, quantity),
        Command::Report => report(&depot),
    }
}

/// The configured customer sheet to load before running `command`.
///
/// `import-customers` loads its own sheet, so the configured one is skipped
/// there to keep the import report to a single pass.
fn startup_customers_file<'a>(config: &'a BackofficeConfig, command: &Command) -> Option<&'a Path> {
    match command {
        Command::ImportCustomers { .. } => None,
        _ => config.customers_file.as_deref(),
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn seed(depot: &Depot, export_dir: &Path) -> Result<()> {
    demo::stock(depot)?;
    demo::sell(depot)?;

    fs::create_dir_all(export_dir)
        .with_context(|| format!("Failed to create {}", export_dir.display()))?;
    let sales = export::export_sales(&depot.sales, &export_dir.join("ventas.csv"))?;
    let stock = export::export_stock(&depot.ledger, &export_dir.join("stock.csv"))?;

    info!(sales_rows = sales, stock_rows = stock, "Seed complete");
    println!(
        "Exported {sales} sale lines and {stock} stock rows to {}",
        export_dir.display()
    );
    Ok(())
}

fn import_customers(depot: &Depot, file: &Path) -> Result<()> {
    let report = import::import_customers_file(&depot.customers, file)?;
    println!(
        "Imported {} customers ({} skipped, {} duplicates)",
        report.imported, report.skipped, report.duplicates
    );

    for customer in depot.customers.list() {
        println!("{}\t{}\t{}", customer.tax_id(), customer.name(), customer.address());
    }
    Ok(())
}

fn sell(depot: &Depot, tax_id: &str, channel: &str, product: &str, quantity: i64) -> Result<()> {
    let Some(channel) = Channel::parse(channel) else {
        bail!("Unknown sale channel '{channel}'");
    };
    demo::stock(depot)?;

    let pos = &depot.pos;
    let mut sale = pos.open_sale(channel, tax_id, &depot.customers)?;
    pos.add_product(&mut sale, product, quantity, &mut prompt_discount)?;

    let summary = pos.complete(sale);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Asks on the terminal which discount to apply to one unit.
///
/// Anything that is not a number counts as an invalid pick.
fn prompt_discount(product: &Product, discounts: &[Money]) -> i64 {
    let mut stderr = io::stderr();
    let _ = writeln!(stderr, "Discounts for {} ({}):", product.name(), product.sale_price());
    for (index, amount) in discounts.iter().enumerate() {
        let _ = writeln!(stderr, "  [{index}] {amount}");
    }
    let _ = write!(stderr, "Choice: ");
    let _ = stderr.flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => line.trim().parse().unwrap_or(-1),
        Err(_) => -1,
    }
}

fn report(depot: &Depot) -> Result<()> {
    demo::stock(depot)?;
    demo::sell(depot)?;

    let summary = json!({
        "sales": depot.sales.summaries(),
        "net_revenue": depot.sales.net_revenue(),
        "stock": depot.ledger.entries(),
        "invoices": depot.purchasing.invoices(),
        "customers": depot.customers.list(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_sheet() -> BackofficeConfig {
        BackofficeConfig {
            export_dir: PathBuf::from("exports"),
            log_filter: "info".to_string(),
            customers_file: Some(PathBuf::from("clientes.csv")),
            discounts: None,
        }
    }

    #[test]
    fn test_import_command_skips_configured_sheet() {
        let config = config_with_sheet();

        let cli = Cli::try_parse_from(["backoffice", "import-customers", "clientes.csv"]).unwrap();
        assert_eq!(startup_customers_file(&config, &cli.command), None);

        let cli = Cli::try_parse_from(["backoffice", "report"]).unwrap();
        assert_eq!(
            startup_customers_file(&config, &cli.command),
            Some(Path::new("clientes.csv"))
        );
    }

    #[test]
    fn test_no_configured_sheet_loads_nothing() {
        let config = BackofficeConfig {
            customers_file: None,
            ..config_with_sheet()
        };
        let cli = Cli::try_parse_from(["backoffice", "seed"]).unwrap();
        assert_eq!(startup_customers_file(&config, &cli.command), None);
    }
}
