//! Unified error type for the ledger.
//!
//! Input validation errors are raised before any data store call is made, so a
//! caller can surface them inline and retry without reconciling state.

use sea_orm::DbErr;
use thiserror::Error;

/// All failures produced by the ledger.
#[derive(Debug, Error)]
pub enum Error {
    /// The data store rejected or failed a call
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// A money amount was not finite, negative, or zero where positive is required
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A quantity was not a finite positive number
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: f64,
    },

    /// A required text field was empty
    #[error("{field} cannot be empty")]
    InvalidName {
        /// Name of the empty field
        field: &'static str,
    },

    /// No product with this id exists for the account
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Requested product id
        id: i64,
    },

    /// No customer with this id exists for the account
    #[error("Customer not found: {id}")]
    CustomerNotFound {
        /// Requested customer id
        id: i64,
    },

    /// No order with this id exists for the account
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Requested order id
        id: i64,
    },

    /// An order was submitted without line items
    #[error("An order needs at least one item")]
    EmptyOrder,

    /// A payment larger than the balance was submitted without confirmation
    #[error("Payment of {amount:.2} exceeds the balance of {balance:.2} and was not confirmed")]
    OverpaymentNotConfirmed {
        /// Submitted payment
        amount: f64,
        /// Balance due before the payment
        balance: f64,
    },

    /// A delivery was confirmed for an order that is no longer pending
    #[error("Order {id} is already delivered")]
    AlreadyDelivered {
        /// Order id
        id: i64,
    },

    /// I/O failure while reading local files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
