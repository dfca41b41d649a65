//! Demo data for the `seed` and `report` commands.

use depot_core::{Channel, Customer, Money, Product, PurchaseOrder};
use depot_store::{Depot, FixedChoice, StoreResult};
use tracing::info;

/// `(name, category, purchase cost, commission, quantity)`
const DEMO_STOCK: [(&str, &str, i64, i64, i64); 5] = [
    ("Gas 5kg", "gas", 10_000, 1_000, 20),
    ("Gas 11kg", "gas", 15_000, 2_000, 20),
    ("Gas 15kg", "gas", 25_000, 3_000, 15),
    ("Gas 45kg", "gas", 60_000, 8_000, 6),
    ("Regulador", "accesorio", 5_000, 1_500, 10),
];

/// Registers demo customers and receives demo stock through a purchase order.
pub fn stock(depot: &Depot) -> StoreResult<()> {
    depot
        .customers
        .register(Customer::new("Cliente Mostrador", "GEN0", "", "Local"));
    depot.customers.register(Customer::new(
        "Ana Rojas",
        "12.345.678-5",
        "+56 9 1234 5678",
        "Los Aromos 123",
    ));

    let mut order = PurchaseOrder::new("OC-DEMO-1", "Distribuidora Central");
    for (name, category, cost, commission, quantity) in DEMO_STOCK {
        let product = Product::new(
            name,
            category,
            Money::from_pesos(cost),
            Money::from_pesos(commission),
        )?;
        order.add_item(product, quantity);
    }
    depot.purchasing.add_order(order);
    depot.purchasing.invoice_order("OC-DEMO-1", "FAC-0001")?;

    info!(products = DEMO_STOCK.len(), "Demo stock received");
    Ok(())
}

/// Rings up a counter sale and a delivery.
pub fn sell(depot: &Depot) -> StoreResult<()> {
    let pos = &depot.pos;

    let mut counter = pos.open_sale(Channel::Local, "GEN0", &depot.customers)?;
    pos.add_product(&mut counter, "gas 15kg", 2, &mut FixedChoice(1))?;
    pos.add_product(&mut counter, "regulador", 1, &mut FixedChoice(0))?;
    pos.complete(counter);

    let mut delivery = pos.open_sale(Channel::Delivery, "12.345.678-5", &depot.customers)?;
    pos.add_product(&mut delivery, "gas 45kg", 1, &mut FixedChoice(0))?;
    pos.add_product(&mut delivery, "gas 11kg", 2, &mut FixedChoice(1))?;
    pos.complete(delivery);

    Ok(())
}
