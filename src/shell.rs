//! Interactive menu loop
//!
//! Reads one choice per line, routes it through `dispatch`, prints the result
//! and repeats until the operator exits or input ends. Errors caused by the
//! operator or the data are printed and the loop continues; only failures to
//! read input or write output end the session with an error.

use crate::config::CommitMode;
use crate::database::{Store, PRICE_BUMP_CATEGORY, PRICE_BUMP_FACTOR};
use crate::error::{Result, StoreError};
use crate::formatters::{
    format_average_order_value, format_most_popular_category, format_orders_per_customer,
    format_price_increase, format_products_per_category, format_total_sales,
};
use crate::input::{parse_id, parse_price, parse_quantity};
use crate::menu::{render_menu, Command};
use crate::models::{NewCustomer, NewOrder, NewProduct};
use std::io::{BufRead, Write};

pub struct Shell<'a, R, W> {
    store: &'a Store,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Gives back the writer, e.g. to inspect what was printed
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until "0" is chosen or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", render_menu())?;
            let Some(line) = self.read_field("Enter option number: ")? else {
                log::info!("Input closed, leaving menu");
                return self.exit();
            };

            match Command::parse(&line) {
                Some(Command::Exit) => return self.exit(),
                Some(command) => self.dispatch(command)?,
                None => writeln!(self.output, "Unknown command. Please try again.")?,
            }
        }
    }

    /// Executes one command and reports its outcome.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        log::debug!("Dispatching {:?}", command);
        let result = match command {
            Command::AddProduct => self.add_product(),
            Command::AddCustomer => self.add_customer(),
            Command::CreateOrder => self.create_order(),
            Command::TotalSales => self.total_sales(),
            Command::OrdersPerCustomer => self.orders_per_customer(),
            Command::AverageOrderValue => self.average_order_value(),
            Command::MostPopularCategory => self.most_popular_category(),
            Command::ProductsPerCategory => self.products_per_category(),
            Command::IncreasePrices => self.increase_prices(),
            Command::Save => self.save(),
            Command::Exit => self.exit(),
        };

        match result {
            Ok(()) => {
                if command.is_mutation()
                    && self.store.commit_mode() == CommitMode::Manual
                    && self.store.has_pending_changes()
                {
                    writeln!(
                        self.output,
                        "(not saved yet, choose {} to save)",
                        Command::Save.key()
                    )?;
                }
                Ok(())
            }
            Err(StoreError::Io(e)) => Err(StoreError::Io(e)),
            Err(e) => {
                if e.is_recoverable() {
                    log::warn!("{:?} rejected: {}", command, e);
                } else {
                    log::error!("{:?} failed: {}", command, e);
                }
                writeln!(self.output, "Error: {e}")?;
                Ok(())
            }
        }
    }

    /// Prompts and reads one line. `None` when input has ended.
    fn read_field(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn add_product(&mut self) -> Result<()> {
        let Some(name) = self.read_field("Product name: ")? else {
            return Ok(());
        };
        let Some(category) = self.read_field("Category (смартфони/ноутбуки/планшети): ")? else {
            return Ok(());
        };
        let Some(price) = self.read_field("Price: ")? else {
            return Ok(());
        };

        let product = NewProduct::new(name, category, parse_price(&price)?);
        let id = self.store.add_product(&product)?;
        writeln!(self.output, "Product added (id {id}).")?;
        Ok(())
    }

    fn add_customer(&mut self) -> Result<()> {
        let Some(first_name) = self.read_field("First name: ")? else {
            return Ok(());
        };
        let Some(last_name) = self.read_field("Last name: ")? else {
            return Ok(());
        };
        let Some(email) = self.read_field("Email: ")? else {
            return Ok(());
        };

        let id = self
            .store
            .add_customer(&NewCustomer::new(first_name, last_name, email))?;
        writeln!(self.output, "Customer added (id {id}).")?;
        Ok(())
    }

    fn create_order(&mut self) -> Result<()> {
        let Some(customer_id) = self.read_field("Customer ID: ")? else {
            return Ok(());
        };
        let customer_id = parse_id("customer id", &customer_id)?;
        let Some(product_id) = self.read_field("Product ID: ")? else {
            return Ok(());
        };
        let product_id = parse_id("product id", &product_id)?;
        let Some(quantity) = self.read_field("Quantity: ")? else {
            return Ok(());
        };
        let quantity = parse_quantity(&quantity)?;

        let id = self
            .store
            .create_order(&NewOrder::new(customer_id, product_id, quantity))?;
        writeln!(self.output, "Order added (id {id}).")?;
        Ok(())
    }

    fn total_sales(&mut self) -> Result<()> {
        let total = self.store.total_sales()?;
        writeln!(self.output, "{}", format_total_sales(total))?;
        Ok(())
    }

    fn orders_per_customer(&mut self) -> Result<()> {
        let rows = self.store.orders_per_customer()?;
        write!(self.output, "{}", format_orders_per_customer(&rows))?;
        Ok(())
    }

    fn average_order_value(&mut self) -> Result<()> {
        let average = self.store.average_order_value()?;
        writeln!(self.output, "{}", format_average_order_value(average))?;
        Ok(())
    }

    fn most_popular_category(&mut self) -> Result<()> {
        let top = self.store.most_popular_category()?;
        writeln!(self.output, "{}", format_most_popular_category(top.as_ref()))?;
        Ok(())
    }

    fn products_per_category(&mut self) -> Result<()> {
        let rows = self.store.products_per_category()?;
        write!(self.output, "{}", format_products_per_category(&rows))?;
        Ok(())
    }

    fn increase_prices(&mut self) -> Result<()> {
        let updated = self.store.increase_category_prices()?;
        writeln!(
            self.output,
            "{}",
            format_price_increase(PRICE_BUMP_CATEGORY, PRICE_BUMP_FACTOR, updated)
        )?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        if self.store.save()? {
            writeln!(self.output, "Changes saved.")?;
        } else {
            writeln!(self.output, "Nothing to save.")?;
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        if self.store.has_pending_changes() {
            writeln!(self.output, "Unsaved changes will be discarded.")?;
        }
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(store: &Store, script: &str) -> String {
        let mut shell = Shell::new(store, Cursor::new(script.as_bytes().to_vec()), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    fn test_store() -> Store {
        Store::open_in_memory(CommitMode::Manual).unwrap()
    }

    #[test]
    fn exit_ends_session() {
        let store = test_store();
        let output = run_script(&store, "0\n4\n");
        assert!(output.contains("Goodbye!"));
        assert!(!output.contains("Total sales: "));
    }

    #[test]
    fn end_of_input_exits() {
        let store = test_store();
        let output = run_script(&store, "");
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn unknown_command_keeps_looping() {
        let store = test_store();
        let output = run_script(&store, "42\nhello\n4\n0\n");
        assert_eq!(output.matches("Unknown command. Please try again.").count(), 2);
        assert!(output.contains("Total sales: 0.00"));
    }

    #[test]
    fn add_product_then_report() {
        let store = test_store();
        let output = run_script(&store, "1\niPad\nПланшети\n499,50\n8\n0\n");
        assert!(output.contains("Product added (id 1)."));
        assert!(output.contains("(not saved yet, choose 10 to save)"));
        assert!(output.contains("Category: Планшети - 1 product\n"));
        let product = store.product(1).unwrap().unwrap();
        assert!((product.price - 499.5).abs() < 1e-9);
    }

    #[test]
    fn malformed_price_is_reported_and_session_continues() {
        let store = test_store();
        let output = run_script(&store, "1\niPad\nПланшети\nlots\n4\n0\n");
        assert!(output.contains("Error: Invalid price"));
        assert!(output.contains("Total sales: 0.00"));
        assert_eq!(store.product_count().unwrap(), 0);
    }

    #[test]
    fn duplicate_email_is_reported() {
        let store = test_store();
        let output = run_script(
            &store,
            "2\nA\nB\na@example.com\n2\nC\nD\na@example.com\n0\n",
        );
        assert!(output.contains("Customer added (id 1)."));
        assert!(output.contains("Error: A customer with email 'a@example.com' already exists"));
        assert_eq!(store.customer_count().unwrap(), 1);
    }

    #[test]
    fn malformed_order_field_aborts_before_later_prompts() {
        let store = test_store();
        let output = run_script(&store, "3\nabc\n0\n");
        assert!(output.contains("Error: Invalid customer id"));
        assert!(!output.contains("Product ID: "));
        assert_eq!(store.order_count().unwrap(), 0);
    }

    #[test]
    fn order_for_missing_customer_is_rejected() {
        let store = test_store();
        let output = run_script(&store, "3\n7\n1\n2\n0\n");
        assert!(output.contains("Error: Customer with id 7 does not exist"));
        assert_eq!(store.order_count().unwrap(), 0);
    }

    #[test]
    fn full_order_flow() {
        let store = test_store();
        let script = "1\nA\nX\n100\n1\nB\nY\n50\n2\nOne\nBuyer\none@example.com\n\
                      3\n1\n1\n2\n3\n1\n2\n1\n4\n6\n7\n5\n10\n0\n";
        let output = run_script(&store, script);

        assert!(output.contains("Order added (id 1)."));
        assert!(output.contains("Order added (id 2)."));
        assert!(output.contains("Total sales: 250.00"));
        assert!(output.contains("Average order value: 125.00"));
        assert!(output.contains("Most popular category: X (1 order)"));
        assert!(output.contains("One Buyer - 2 orders"));
        assert!(output.contains("Changes saved."));
        assert!(!output.contains("Unsaved changes will be discarded."));
    }

    #[test]
    fn price_increase_message_and_effect() {
        let store = test_store();
        store
            .add_product(&NewProduct::new("Phone", PRICE_BUMP_CATEGORY, 100.0))
            .unwrap();
        let output = run_script(&store, "9\n0\n");
        assert!(output.contains("increased by 10% (1 updated)"));
        let price = store.product(1).unwrap().unwrap().price;
        assert!((price - 110.0).abs() < 1e-9);
    }

    #[test]
    fn price_increase_without_matches_leaves_nothing_to_save() {
        let store = test_store();
        let output = run_script(&store, "9\n10\n0\n");
        assert!(output.contains("increased by 10% (0 updated)"));
        assert!(!output.contains("not saved yet"));
        assert!(output.contains("Nothing to save."));
        assert!(!output.contains("Unsaved changes will be discarded."));
    }

    #[test]
    fn save_with_nothing_pending() {
        let store = test_store();
        let output = run_script(&store, "10\n0\n");
        assert!(output.contains("Nothing to save."));
    }

    #[test]
    fn exit_warns_about_unsaved_changes() {
        let store = test_store();
        let output = run_script(&store, "1\nA\nX\n1\n0\n");
        assert!(output.contains("Unsaved changes will be discarded."));
    }

    #[test]
    fn autocommit_mode_has_no_save_hint() {
        let store = Store::open_in_memory(CommitMode::Auto).unwrap();
        let output = run_script(&store, "1\nA\nX\n1\n0\n");
        assert!(output.contains("Product added (id 1)."));
        assert!(!output.contains("not saved yet"));
        assert!(!output.contains("Unsaved changes"));
    }

    #[test]
    fn input_ending_mid_operation_changes_nothing() {
        let store = test_store();
        let output = run_script(&store, "1\niPad\n");
        assert!(output.contains("Goodbye!"));
        assert_eq!(store.product_count().unwrap(), 0);
    }
}
