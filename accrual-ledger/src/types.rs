//! Core types for the accrual ledger
//!
//! All types are designed for:
//! - Exact integer arithmetic (u64 token units, u128 intermediates)
//! - Deterministic serialization (serde)
//! - Memory safety (no unsafe code)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point scale for interest rates.
///
/// A rate of `RATE_SCALE` means one token unit of interest per token unit of
/// principal per second.
pub const RATE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Sentinel amount meaning "the holder's entire settled balance".
///
/// Accepted by burn, transfer, delegated transfer, and redeem; resolved
/// against the settled balance at call time.
pub const MAX_AMOUNT: u64 = u64::MAX;

/// Sentinel allowance meaning "unlimited"; never decremented on spend.
pub const UNLIMITED_ALLOWANCE: u64 = u64::MAX;

/// Holder identifier (address, account number, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderId(String);

impl HolderId {
    /// Create new holder ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-holder account state
///
/// Implicitly created with all fields zero on first reference. `locked_rate`
/// is assigned when the balance first leaves zero and thereafter changed only
/// by the inheritance rule on transfer into an empty account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderAccount {
    /// Raw minted/burned token units, excluding unsettled interest
    pub principal: u64,

    /// Rate snapshot bound to this holder (fixed-point, `RATE_SCALE`)
    pub locked_rate: u64,

    /// Unix timestamp of last settlement (seconds)
    pub last_settled_at: u64,
}

impl HolderAccount {
    /// Interest accrued since the last settlement, as of `now`.
    ///
    /// This is the single accrual formula; both reads and settlement go
    /// through it.
    pub fn accrued_at(&self, now: u64) -> Result<u64> {
        let elapsed = now.saturating_sub(self.last_settled_at);
        let numerator = (self.principal as u128)
            .checked_mul(self.locked_rate as u128)
            .and_then(|v| v.checked_mul(elapsed as u128))
            .ok_or_else(|| Error::Overflow("accrual numerator".to_string()))?;
        u64::try_from(numerator / RATE_SCALE)
            .map_err(|_| Error::Overflow("accrued interest exceeds u64".to_string()))
    }

    /// Observed balance as of `now`: principal plus accrued interest.
    ///
    /// Pure computation; commits nothing.
    pub fn balance_at(&self, now: u64) -> Result<u64> {
        let accrued = self.accrued_at(now)?;
        self.principal
            .checked_add(accrued)
            .ok_or_else(|| Error::Overflow("observed balance exceeds u64".to_string()))
    }

    /// Fold accrued interest into principal and advance the accrual clock.
    ///
    /// Idempotent at a fixed timestamp: zero elapsed time yields zero accrual.
    /// Returns the interest realized.
    pub fn settle(&mut self, now: u64) -> Result<u64> {
        let accrued = self.accrued_at(now)?;
        self.principal = self
            .principal
            .checked_add(accrued)
            .ok_or_else(|| Error::Overflow("settled principal exceeds u64".to_string()))?;
        self.last_settled_at = self.last_settled_at.max(now);
        Ok(accrued)
    }
}
