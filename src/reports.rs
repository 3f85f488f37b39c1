//! Sales reports
//!
//! Read-only aggregate queries. Orders are joined to products on the product
//! id, so an order whose product is missing contributes nothing.

use crate::database::Store;
use crate::error::Result;
use crate::models::{CategoryCount, CustomerOrderCount};

impl Store {
    /// Sum of price × quantity over all orders, 0 when there are none
    pub fn total_sales(&self) -> Result<f64> {
        Ok(self.conn().query_row(
            "SELECT COALESCE(SUM(p.price * o.quantity), 0.0)
             FROM orders o
             JOIN products p ON o.product_id = p.id",
            [],
            |row| row.get(0),
        )?)
    }

    /// Mean of price × quantity over all orders, 0 when there are none
    pub fn average_order_value(&self) -> Result<f64> {
        Ok(self.conn().query_row(
            "SELECT COALESCE(AVG(p.price * o.quantity), 0.0)
             FROM orders o
             JOIN products p ON o.product_id = p.id",
            [],
            |row| row.get(0),
        )?)
    }

    /// Category with the most orders.
    ///
    /// Ties go to the category name that sorts first. `None` when there are no orders.
    pub fn most_popular_category(&self) -> Result<Option<CategoryCount>> {
        let mut stmt = self.conn().prepare(
            "SELECT p.category, COUNT(*) AS count
             FROM orders o
             JOIN products p ON o.product_id = p.id
             GROUP BY p.category
             ORDER BY count DESC, p.category ASC
             LIMIT 1",
        )?;

        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => Ok(Some(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })),
            None => Ok(None),
        }
    }

    /// Every customer with their number of orders, by customer id
    pub fn orders_per_customer(&self) -> Result<Vec<CustomerOrderCount>> {
        let mut stmt = self.conn().prepare(
            "SELECT c.customer_id,
                    c.first_name || ' ' || c.last_name AS customer,
                    COUNT(o.order_id) AS total_orders
             FROM customers c
             LEFT JOIN orders o ON c.customer_id = o.customer_id
             GROUP BY c.customer_id
             ORDER BY c.customer_id ASC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(CustomerOrderCount {
                    customer_id: row.get(0)?,
                    full_name: row.get(1)?,
                    orders: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Number of products in each category, by category name
    pub fn products_per_category(&self) -> Result<Vec<CategoryCount>> {
        let mut stmt = self.conn().prepare(
            "SELECT category, COUNT(*)
             FROM products
             GROUP BY category
             ORDER BY category ASC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}
