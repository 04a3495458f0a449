//! Unified error type for the expense tracker.

use thiserror::Error;

/// Every failure the tracker can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Storage backend failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (sockets, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// The addressed expense does not exist in the collection
    #[error("Expense not found: {id}")]
    ExpenseNotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// Submitted form fields failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// User-visible explanation
        message: String,
    },

    /// Anonymous sign-in failed
    #[error("Authentication error: {message}")]
    Auth {
        /// What went wrong
        message: String,
    },

    /// The ledger task has shut down and no longer accepts commands
    #[error("Ledger controller is no longer running")]
    ControllerClosed,
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
