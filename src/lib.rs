//! Order Tracker - products, customers and orders on SQLite
//!
//! Registers products and customers, records orders and prints sales reports
//! from an interactive menu. All data lives in a single SQLite file.

pub mod config;
pub mod database;
pub mod error;
pub mod formatters;
pub mod input;
pub mod menu;
pub mod models;
pub mod reports;
pub mod seed;
pub mod shell;

pub use config::{Args, CommitMode};
pub use database::{init_schema, Store, PRICE_BUMP_CATEGORY, PRICE_BUMP_FACTOR};
pub use error::{Result, StoreError};
pub use menu::Command;
pub use models::{
    CategoryCount, Customer, CustomerOrderCount, NewCustomer, NewOrder, NewProduct, Order,
    Product,
};
pub use seed::{load_demo_data, SeedStats};
pub use shell::Shell;
