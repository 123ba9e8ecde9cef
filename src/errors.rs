use rust_decimal::Decimal;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Input rejected before reaching the database
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// Monetary amount outside the accepted range
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// No client with this id
    #[error("Client not found: {id}")]
    ClientNotFound {
        /// Client id
        id: i64,
    },

    /// No employee with this id
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// Employee id
        id: i64,
    },

    /// No material with this id
    #[error("Material not found: {id}")]
    MaterialNotFound {
        /// Material id
        id: i64,
    },

    /// No order with this id
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Order id
        id: i64,
    },

    /// No order template with this id
    #[error("Order template not found: {id}")]
    TemplateNotFound {
        /// Template id
        id: i64,
    },

    /// No order template row for this kind
    #[error("Order template not found for kind: {kind}")]
    TemplateKindNotFound {
        /// Template slug
        kind: String,
    },

    /// No task with this id
    #[error("Task not found: {id}")]
    TaskNotFound {
        /// Task id
        id: i64,
    },

    /// No payment with this id
    #[error("Payment not found: {id}")]
    PaymentNotFound {
        /// Payment id
        id: i64,
    },

    /// No photo with this id
    #[error("Photo not found: {id}")]
    PhotoNotFound {
        /// Photo id
        id: i64,
    },

    /// Another client already uses this PESEL
    #[error("Client with PESEL {pesel} already exists")]
    DuplicatePesel {
        /// The conflicting PESEL
        pesel: String,
    },

    /// Error reported by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
