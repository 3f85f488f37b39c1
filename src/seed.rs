//! Demonstration data inserted on startup.
//!
//! Customers are only inserted when their email is not registered yet, but the
//! products and orders are inserted on every run, so each start adds two more
//! products and two more orders. Start with `--skip-seed` to avoid that.

use crate::database::{now_timestamp, Store};
use crate::error::Result;
use crate::models::{NewCustomer, NewOrder, NewProduct};

/// One product, its customer, and the order linking them.
struct DemoSale {
    product: (&'static str, &'static str, f64),
    customer: (&'static str, &'static str, &'static str),
    /// Fixed references, independent of the ids assigned above
    order: (i64, i64, i64),
}

const DEMO_SALES: [DemoSale; 2] = [
    DemoSale {
        product: ("iPhone 13", "Смартфони", 999.99),
        customer: ("Олег", "Петренко", "oleg@example.com"),
        order: (1, 1, 2),
    },
    DemoSale {
        product: ("Samsung Galaxy S22", "Смартфони", 799.99),
        customer: ("Марія", "Іванова", "maria@example.com"),
        order: (2, 2, 1),
    },
];

/// Statistics from a seeding run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub products: usize,
    pub customers: usize,
    pub orders: usize,
}

/// Inserts the demonstration rows and commits them, whatever the commit mode.
pub fn load_demo_data(store: &Store) -> Result<SeedStats> {
    load_demo_data_at(store, &now_timestamp())
}

/// Seeding with an explicit order timestamp, used in tests.
fn load_demo_data_at(store: &Store, order_date: &str) -> Result<SeedStats> {
    let mut stats = SeedStats::default();

    for sale in &DEMO_SALES {
        let (name, category, price) = sale.product;
        store.add_product(&NewProduct::new(name, category, price))?;
        stats.products += 1;

        let (first_name, last_name, email) = sale.customer;
        if store.customer_id_by_email(email)?.is_none() {
            store.add_customer(&NewCustomer::new(first_name, last_name, email))?;
            stats.customers += 1;
        } else {
            log::debug!("Demo customer {} already present", email);
        }

        let (customer_id, product_id, quantity) = sale.order;
        store.insert_order(
            &NewOrder::new(customer_id, product_id, quantity),
            order_date,
        )?;
        stats.orders += 1;
    }

    store.save()?;
    log::info!(
        "Seeded {} products, {} customers, {} orders",
        stats.products,
        stats.customers,
        stats.orders
    );
    Ok(stats)
}
