//! Error types for the accrual ledger

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
///
/// Every failure is an atomic rejection: no partial state mutation is
/// observable after a failed call.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller lacks the required capability or ownership
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Attempted to raise the global rate
    #[error("Rate must decrease: current {current}, requested {requested}")]
    RateMustDecrease {
        /// Rate currently in effect
        current: u64,
        /// Rate that was requested
        requested: u64,
    },

    /// Resolved amount exceeds settled principal
    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Settled principal available
        available: u64,
        /// Amount requested
        requested: u64,
    },

    /// Resolved amount exceeds the spender's allowance
    #[error("Insufficient allowance: available {available}, requested {requested}")]
    InsufficientAllowance {
        /// Allowance available
        available: u64,
        /// Amount requested
        requested: u64,
    },

    /// Transfer targets the designated null/burn identity
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    /// Arithmetic overflow in balance or accrual computation
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
