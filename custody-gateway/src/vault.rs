//! Collateral custody abstraction
//!
//! The gateway is generic over where the backing collateral actually lives;
//! [`InMemoryVault`] is the local implementation used in tests and demos,
//! while production wires in a custody integration behind the same trait.

use crate::{Error, Result};

/// Custody of the collateral backing the ledger's liabilities
pub trait CollateralVault: Send {
    /// Identifier of the underlying asset
    fn asset_id(&self) -> &str;

    /// Collateral currently held
    fn balance(&self) -> u64;

    /// Take `amount` of collateral into custody
    fn deposit(&mut self, amount: u64) -> Result<()>;

    /// Release `amount` of collateral back to the caller
    fn release(&mut self, amount: u64) -> Result<()>;
}

/// In-memory collateral vault
#[derive(Debug, Clone)]
pub struct InMemoryVault {
    asset_id: String,
    balance: u64,
}

impl InMemoryVault {
    /// Create an empty vault for `asset_id`
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            balance: 0,
        }
    }
}

impl CollateralVault for InMemoryVault {
    fn asset_id(&self) -> &str {
        &self.asset_id
    }

    fn balance(&self) -> u64 {
        self.balance
    }

    fn deposit(&mut self, amount: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| Error::Vault("collateral balance overflow".to_string()))?;
        Ok(())
    }

    fn release(&mut self, amount: u64) -> Result<()> {
        if amount > self.balance {
            return Err(Error::Vault(format!(
                "insufficient collateral: held {}, requested {}",
                self.balance, amount
            )));
        }
        self.balance -= amount;
        Ok(())
    }
}
