//! End-to-end back-office flows against files on disk.

use std::fs;
use std::path::PathBuf;

use depot_core::{Channel, Money, Product, PurchaseOrder};
use depot_store::{export, import, Depot, FixedChoice, StoreError};
use tempfile::TempDir;

struct TestEnvironment {
    dir: TempDir,
    depot: Depot,
}

impl TestEnvironment {
    fn new() -> Self {
        TestEnvironment {
            dir: TempDir::new().unwrap(),
            depot: Depot::default(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn stock_gas(&self) {
        let mut order = PurchaseOrder::new("OC-1", "Abastible");
        for (name, cost, commission) in [
            ("Gas 5kg", 10_000, 1_000),
            ("Gas 15kg", 25_000, 3_000),
        ] {
            let product = Product::new(
                name,
                "gas",
                Money::from_pesos(cost),
                Money::from_pesos(commission),
            )
            .unwrap();
            order.add_item(product, 10);
        }
        self.depot.purchasing.add_order(order);
        self.depot.purchasing.invoice_order("OC-1", "FAC-100").unwrap();
    }
}

#[test]
fn test_import_sell_and_export() {
    let env = TestEnvironment::new();

    let sheet = env.path("clientes.csv");
    fs::write(
        &sheet,
        "Nombre,Telefono,Direccion\nAna,555,Calle 1\n,,\nLuis,,Calle 2\n",
    )
    .unwrap();
    let report = import::import_customers_file(&env.depot.customers, &sheet).unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 1);
    assert!(env.depot.customers.find("GEN3").is_some());

    env.stock_gas();

    let pos = &env.depot.pos;
    let mut sale = pos
        .open_sale(Channel::Delivery, "GEN1", &env.depot.customers)
        .unwrap();
    pos.add_product(&mut sale, "gas 15kg", 2, &mut FixedChoice(1))
        .unwrap();
    pos.add_product(&mut sale, "gas 5kg", 1, &mut FixedChoice(9))
        .unwrap();
    let summary = pos.complete(sale);

    // 2 × (28000 - 5000) + (11000 - 0)
    assert_eq!(summary.net_total.pesos(), 57_000);
    assert_eq!(env.depot.ledger.quantity_of("gas 15kg"), Some(8));

    let sales_csv = env.path("ventas.csv");
    assert_eq!(export::export_sales(&env.depot.sales, &sales_csv).unwrap(), 3);
    let text = fs::read_to_string(&sales_csv).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].ends_with(",delivery,Gas 15kg,28000,5000,23000"));
    assert!(lines[3].ends_with(",delivery,Gas 5kg,11000,0,11000"));

    let stock_csv = env.path("stock.csv");
    assert_eq!(export::export_stock(&env.depot.ledger, &stock_csv).unwrap(), 2);
    let text = fs::read_to_string(&stock_csv).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Nombre,Tipo,PrecioCompra,Stock",
            "Gas 15kg,gas,25000,8",
            "Gas 5kg,gas,10000,9",
        ]
    );
}

#[test]
fn test_missing_sheet_reports_path() {
    let env = TestEnvironment::new();
    let missing = env.path("nope.csv");

    let err = import::import_customers_file(&env.depot.customers, &missing).unwrap_err();
    assert!(err.to_string().contains("nope.csv"));

    let missing = env.path("nope.xlsx");
    let err = import::import_customers_file(&env.depot.customers, &missing).unwrap_err();
    assert!(matches!(err, StoreError::Workbook { .. }));
    assert!(err.to_string().contains("nope.xlsx"));
}

#[test]
fn test_receipts_follow_invoices() {
    let env = TestEnvironment::new();
    env.stock_gas();

    let mut invoice = env.depot.purchasing.new_invoice("FAC-101", "Lipigas").unwrap();
    invoice.add_item(
        Product::new("Gas 5kg", "gas", Money::from_pesos(10_000), Money::from_pesos(1_000)).unwrap(),
        5,
    );
    env.depot.purchasing.post_invoice(&mut invoice).unwrap();

    let receipts = env.depot.purchasing.receipts_for_product("gas 5kg");
    let numbers: Vec<&str> = receipts.iter().map(|r| r.invoice_number.as_str()).collect();
    assert_eq!(numbers, vec!["FAC-100", "FAC-101"]);
    assert_eq!(env.depot.ledger.quantity_of("gas 5kg"), Some(15));
}
