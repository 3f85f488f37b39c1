/// A product row
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
}

/// A customer row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Customer {
    /// First and last name joined by a space, as shown in reports
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An order row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub order_date: String,
}

/// Fields for a product that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

/// Fields for a customer that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewCustomer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// Fields for an order that has not been stored yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

impl NewOrder {
    pub fn new(customer_id: i64, product_id: i64, quantity: i64) -> Self {
        Self {
            customer_id,
            product_id,
            quantity,
        }
    }
}

/// A category label with a count (orders or products, depending on the report)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// One line of the orders-per-customer report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerOrderCount {
    pub customer_id: i64,
    pub full_name: String,
    pub orders: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_with_space() {
        let customer = Customer {
            id: 1,
            first_name: "Олег".to_string(),
            last_name: "Петренко".to_string(),
            email: "oleg@example.com".to_string(),
        };
        assert_eq!(customer.full_name(), "Олег Петренко");
    }
}
