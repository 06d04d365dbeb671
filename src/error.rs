//! Error types for the shopping cart.

use thiserror::Error;

/// Result type alias for cart, payment and session operations
pub type Result<T> = std::result::Result<T, CartError>;

/// Errors that can occur while driving the cart.
///
/// Removing an item that is not in the cart is deliberately absent here:
/// it is a silent no-op, not a failure.
#[derive(Error, Debug)]
pub enum CartError {
    /// Failed to open or read the session file, or to write output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// The payment factory was asked for a type tag it does not know
    #[error("Invalid payment method type: {0}")]
    InvalidPaymentMethod(String),

    /// Invalid session record; `row` is the line the record starts on
    #[error("Invalid session record at row {row}: {message}")]
    InvalidRecord { row: u64, message: String },
}
