//! Error types for the custody gateway

use thiserror::Error;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Gateway errors
#[derive(Error, Debug)]
pub enum Error {
    /// Release of backing collateral failed; the paired burn was rolled back
    #[error("Collateral transfer failed: {0}")]
    CollateralTransferFailed(String),

    /// Vault-level custody error
    #[error("Vault error: {0}")]
    Vault(String),

    /// Ledger error
    #[error("Ledger error: {0}")]
    Ledger(#[from] accrual_ledger::Error),
}
