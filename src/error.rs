//! Error types for order_tracker

use thiserror::Error;

/// Unified error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A customer with this email is already registered
    #[error("A customer with email '{0}' already exists")]
    DuplicateEmail(String),
    /// User-supplied field could not be accepted
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    /// Order references a customer id that is not in the database
    #[error("Customer with id {0} does not exist")]
    UnknownCustomer(i64),
    /// Order references a product id that is not in the database
    #[error("Product with id {0} does not exist")]
    UnknownProduct(i64),
}

impl StoreError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the interactive session can report this error and carry on.
    ///
    /// Database and I/O failures are not recoverable from the menu loop.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateEmail(_)
                | StoreError::InvalidInput { .. }
                | StoreError::UnknownCustomer(_)
                | StoreError::UnknownProduct(_)
        )
    }
}

/// Result alias for order_tracker operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_recoverable() {
        assert!(StoreError::DuplicateEmail("a@b.c".to_string()).is_recoverable());
        assert!(StoreError::invalid("price", "negative").is_recoverable());
        assert!(StoreError::UnknownCustomer(7).is_recoverable());
        assert!(StoreError::UnknownProduct(7).is_recoverable());
    }

    #[test]
    fn io_errors_are_fatal() {
        let err = StoreError::from(std::io::Error::other("broken pipe"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn invalid_input_message_names_field() {
        let err = StoreError::invalid("quantity", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid quantity: must be greater than zero"
        );
    }
}
