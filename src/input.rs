//! Parsing of operator-typed numeric fields.
//!
//! Every numeric field goes through these functions so that malformed input is
//! reported the same way no matter which menu action asked for it.

use crate::error::{Result, StoreError};
use log::{debug, warn};

/// Parses a price, accepting both comma and dot decimal separators.
///
/// # Returns
/// The price as f64, or `InvalidInput` if it is not a finite, non-negative number.
pub fn parse_price(price_str: &str) -> Result<f64> {
    debug!("Parsing price string: {price_str}");
    let clean_price = price_str.trim().replace(',', ".");
    let price = clean_price.parse::<f64>().map_err(|e| {
        warn!("Failed to parse price '{price_str}': {e}");
        StoreError::invalid("price", format!("'{}' is not a number", price_str.trim()))
    })?;
    validate_price(price)
}

/// Rejects prices that cannot be stored as a product price.
pub fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() {
        return Err(StoreError::invalid("price", "must be a finite number"));
    }
    if price < 0.0 {
        return Err(StoreError::invalid("price", "must not be negative"));
    }
    Ok(price)
}

/// Parses a customer or product identifier.
pub fn parse_id(field: &'static str, id_str: &str) -> Result<i64> {
    id_str.trim().parse::<i64>().map_err(|e| {
        warn!("Failed to parse {field} '{id_str}': {e}");
        StoreError::invalid(field, format!("'{}' is not a whole number", id_str.trim()))
    })
}

/// Parses an order quantity, which must be a positive whole number.
pub fn parse_quantity(quantity_str: &str) -> Result<i64> {
    let quantity = parse_id("quantity", quantity_str)?;
    validate_quantity(quantity)
}

pub fn validate_quantity(quantity: i64) -> Result<i64> {
    if quantity <= 0 {
        return Err(StoreError::invalid("quantity", "must be greater than zero"));
    }
    Ok(quantity)
}
