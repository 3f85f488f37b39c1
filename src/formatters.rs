use crate::models::{CategoryCount, CustomerOrderCount};

pub fn format_total_sales(total: f64) -> String {
    format!("Total sales: {total:.2}")
}

pub fn format_average_order_value(average: f64) -> String {
    format!("Average order value: {average:.2}")
}

pub fn format_most_popular_category(top: Option<&CategoryCount>) -> String {
    match top {
        Some(top) => format!(
            "Most popular category: {} ({} {})",
            top.category,
            top.count,
            if top.count == 1 { "order" } else { "orders" }
        ),
        None => "Most popular category: none (no orders yet)".to_string(),
    }
}

/// One line per customer, `name - n orders`
pub fn format_orders_per_customer(rows: &[CustomerOrderCount]) -> String {
    if rows.is_empty() {
        return "No customers registered.\n".to_string();
    }

    let mut output = String::new();
    for row in rows {
        output.push_str(&format!(
            "{} - {} {}\n",
            row.full_name,
            row.orders,
            if row.orders == 1 { "order" } else { "orders" }
        ));
    }
    output
}

/// One line per category, `Category: name - n products`
pub fn format_products_per_category(rows: &[CategoryCount]) -> String {
    if rows.is_empty() {
        return "No products registered.\n".to_string();
    }

    let mut output = String::new();
    for row in rows {
        output.push_str(&format!(
            "Category: {} - {} {}\n",
            row.category,
            row.count,
            if row.count == 1 { "product" } else { "products" }
        ));
    }
    output
}

pub fn format_price_increase(category: &str, factor: f64, updated: usize) -> String {
    let percent = (factor - 1.0) * 100.0;
    format!("Prices in category '{category}' increased by {percent:.0}% ({updated} updated)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_total_sales(250.0), "Total sales: 250.00");
        assert_eq!(format_average_order_value(0.0), "Average order value: 0.00");
        assert_eq!(format_total_sales(2799.97), "Total sales: 2799.97");
    }

    #[test]
    fn most_popular_with_and_without_orders() {
        let top = CategoryCount {
            category: "Смартфони".to_string(),
            count: 2,
        };
        assert_eq!(
            format_most_popular_category(Some(&top)),
            "Most popular category: Смартфони (2 orders)"
        );
        assert_eq!(
            format_most_popular_category(None),
            "Most popular category: none (no orders yet)"
        );
    }

    #[test]
    fn orders_per_customer_lines() {
        let rows = vec![
            CustomerOrderCount {
                customer_id: 1,
                full_name: "Олег Петренко".to_string(),
                orders: 1,
            },
            CustomerOrderCount {
                customer_id: 2,
                full_name: "Марія Іванова".to_string(),
                orders: 0,
            },
        ];
        assert_eq!(
            format_orders_per_customer(&rows),
            "Олег Петренко - 1 order\nМарія Іванова - 0 orders\n"
        );
        assert_eq!(format_orders_per_customer(&[]), "No customers registered.\n");
    }

    #[test]
    fn products_per_category_lines() {
        let rows = vec![CategoryCount {
            category: "Ноутбуки".to_string(),
            count: 3,
        }];
        assert_eq!(
            format_products_per_category(&rows),
            "Category: Ноутбуки - 3 products\n"
        );
    }

    #[test]
    fn price_increase_message() {
        assert_eq!(
            format_price_increase("Смартфони", 1.10, 2),
            "Prices in category 'Смартфони' increased by 10% (2 updated)"
        );
    }
}
