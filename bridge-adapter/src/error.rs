//! Error types for the bridge adapter

use thiserror::Error;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bridge errors
#[derive(Error, Debug)]
pub enum Error {
    /// Inbound payload failed to decode; the credit is rejected outright
    #[error("Malformed bridge message: {0}")]
    Malformed(String),

    /// Ledger error
    #[error("Ledger error: {0}")]
    Ledger(#[from] accrual_ledger::Error),

    /// Envelope serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}
