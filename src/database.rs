//! Database operations for the order tracker
//!
//! Uses parameterized queries exclusively (no SQL string concatenation).
//! One `Store` owns the connection for the whole session; in manual commit
//! mode mutations accumulate in an open transaction until `save` is called.

use crate::config::CommitMode;
use crate::error::{Result, StoreError};
use crate::input::{validate_price, validate_quantity};
use crate::models::{Customer, NewCustomer, NewOrder, NewProduct, Order, Product};
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;

/// Category affected by the bulk price increase
pub const PRICE_BUMP_CATEGORY: &str = "Смартфони";

/// Multiplier applied by the bulk price increase
pub const PRICE_BUMP_FACTOR: f64 = 1.10;

/// Initialize the database schema
///
/// Creates tables if they don't exist:
/// - `products`: name, category and price of everything on sale
/// - `customers`: registered customers, unique by email
/// - `orders`: one product and quantity bought by one customer
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            category TEXT,
            price REAL
        );

        CREATE TABLE IF NOT EXISTS customers (
            customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE
        );

        -- Foreign keys are declared but not enforced (SQLite default);
        -- create_order checks references itself
        CREATE TABLE IF NOT EXISTS orders (
            order_id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            order_date DATE NOT NULL,
            FOREIGN KEY (customer_id) REFERENCES customers(customer_id),
            FOREIGN KEY (product_id) REFERENCES products(id)
        );
        ",
    )?;

    log::info!("Database schema initialized");
    Ok(())
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`
pub fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Handle to the order database
pub struct Store {
    conn: Connection,
    mode: CommitMode,
}

impl Store {
    /// Opens (or creates) the database file and initialises the schema.
    pub fn open(path: impl AsRef<Path>, mode: CommitMode) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                log::info!("Created directory: {}", parent.display());
            }
        }

        let conn = Connection::open(path)?;
        log::info!("Opened database: {}", path.display());
        Self::from_connection(conn, mode)
    }

    /// In-memory store, gone when dropped
    pub fn open_in_memory(mode: CommitMode) -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, mode)
    }

    fn from_connection(conn: Connection, mode: CommitMode) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn, mode })
    }

    pub fn commit_mode(&self) -> CommitMode {
        self.mode
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// True when changes have been made since the last save.
    pub fn has_pending_changes(&self) -> bool {
        !self.conn.is_autocommit()
    }

    /// Runs a mutation, inside the session transaction in manual mode.
    ///
    /// If the mutation fails or modifies no rows and it was the one that
    /// opened the transaction, the transaction is rolled back so nothing
    /// counts as pending.
    fn write<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let opened = self.mode == CommitMode::Manual && self.conn.is_autocommit();
        if opened {
            self.conn.execute_batch("BEGIN")?;
            log::debug!("Started transaction for pending changes");
        }

        match f(&self.conn) {
            Ok(value) => {
                if opened && self.conn.changes() == 0 {
                    self.conn.execute_batch("ROLLBACK")?;
                    log::debug!("No rows modified, transaction closed");
                }
                Ok(value)
            }
            Err(e) => {
                if opened {
                    if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK") {
                        log::error!("Rollback after failed change failed: {}", rollback_err);
                    }
                }
                Err(e)
            }
        }
    }

    /// Commits pending changes. Returns false when there was nothing to commit.
    pub fn save(&self) -> Result<bool> {
        if self.conn.is_autocommit() {
            log::debug!("Save requested with no pending changes");
            return Ok(false);
        }
        self.conn.execute_batch("COMMIT")?;
        log::info!("Pending changes committed");
        Ok(true)
    }

    /// Releases the connection. Unsaved changes are rolled back.
    pub fn close(self) -> Result<()> {
        if self.has_pending_changes() {
            log::warn!("Closing database with unsaved changes, rolling back");
            self.conn.execute_batch("ROLLBACK")?;
        }
        self.conn.close().map_err(|(_, e)| StoreError::Database(e))?;
        log::info!("Database closed");
        Ok(())
    }

    // ── Mutations ───────────────────────────────────────────────────────────

    /// Inserts a product and returns its id. Names need not be unique.
    pub fn add_product(&self, product: &NewProduct) -> Result<i64> {
        validate_price(product.price)?;
        let id = self.write(|conn| {
            conn.execute(
                "INSERT INTO products (name, category, price) VALUES (?1, ?2, ?3)",
                params![&product.name, &product.category, product.price],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        log::info!("Added product {} '{}'", id, product.name);
        Ok(id)
    }

    /// Inserts a customer and returns its id.
    ///
    /// Fails with `DuplicateEmail` if the email is already registered.
    pub fn add_customer(&self, customer: &NewCustomer) -> Result<i64> {
        let id = self.write(|conn| {
            match conn.execute(
                "INSERT INTO customers (first_name, last_name, email) VALUES (?1, ?2, ?3)",
                params![&customer.first_name, &customer.last_name, &customer.email],
            ) {
                Ok(_) => Ok(conn.last_insert_rowid()),
                Err(e) if is_unique_violation(&e) => {
                    Err(StoreError::DuplicateEmail(customer.email.clone()))
                }
                Err(e) => Err(e.into()),
            }
        })?;
        log::info!("Added customer {} <{}>", id, customer.email);
        Ok(id)
    }

    /// Records an order stamped with the current local time.
    pub fn create_order(&self, order: &NewOrder) -> Result<i64> {
        self.create_order_at(order, &now_timestamp())
    }

    /// Records an order with an explicit timestamp.
    ///
    /// The customer and product must exist; nothing is written otherwise.
    pub fn create_order_at(&self, order: &NewOrder, order_date: &str) -> Result<i64> {
        validate_quantity(order.quantity)?;
        if self.customer(order.customer_id)?.is_none() {
            return Err(StoreError::UnknownCustomer(order.customer_id));
        }
        if self.product(order.product_id)?.is_none() {
            return Err(StoreError::UnknownProduct(order.product_id));
        }
        self.insert_order(order, order_date)
    }

    /// Inserts an order without checking that its references exist.
    pub(crate) fn insert_order(&self, order: &NewOrder, order_date: &str) -> Result<i64> {
        let id = self.write(|conn| {
            conn.execute(
                "INSERT INTO orders (customer_id, product_id, quantity, order_date)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    order.customer_id,
                    order.product_id,
                    order.quantity,
                    order_date
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        log::info!(
            "Created order {}: customer {} x{} of product {}",
            id,
            order.customer_id,
            order.quantity,
            order.product_id
        );
        Ok(id)
    }

    /// Multiplies the price of every product in `PRICE_BUMP_CATEGORY` by
    /// `PRICE_BUMP_FACTOR`. Repeated calls compound.
    ///
    /// Returns the number of products updated.
    pub fn increase_category_prices(&self) -> Result<usize> {
        let updated = self.write(|conn| {
            Ok(conn.execute(
                "UPDATE products SET price = price * ?1 WHERE category = ?2",
                params![PRICE_BUMP_FACTOR, PRICE_BUMP_CATEGORY],
            )?)
        })?;
        log::info!(
            "Increased prices of {} products in '{}'",
            updated,
            PRICE_BUMP_CATEGORY
        );
        Ok(updated)
    }

    // ── Lookups ─────────────────────────────────────────────────────────────

    pub fn product(&self, id: i64) -> Result<Option<Product>> {
        let product = self
            .conn
            .query_row(
                "SELECT id, name, category, price FROM products WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Product {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        category: row.get(2)?,
                        price: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(product)
    }

    pub fn customer(&self, id: i64) -> Result<Option<Customer>> {
        let customer = self
            .conn
            .query_row(
                "SELECT customer_id, first_name, last_name, email
                 FROM customers WHERE customer_id = ?1",
                params![id],
                |row| {
                    Ok(Customer {
                        id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        email: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(customer)
    }

    pub fn order(&self, id: i64) -> Result<Option<Order>> {
        let order = self
            .conn
            .query_row(
                "SELECT order_id, customer_id, product_id, quantity, order_date
                 FROM orders WHERE order_id = ?1",
                params![id],
                |row| {
                    Ok(Order {
                        id: row.get(0)?,
                        customer_id: row.get(1)?,
                        product_id: row.get(2)?,
                        quantity: row.get(3)?,
                        order_date: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(order)
    }

    /// Id of the customer registered with this email, if any
    pub fn customer_id_by_email(&self, email: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT customer_id FROM customers WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    pub fn product_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?)
    }

    pub fn customer_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?)
    }

    pub fn order_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?)
    }
}
