//! Configuration for the accrual ledger

use crate::types::HolderId;
use serde::{Deserialize, Serialize};

/// Ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Owner identity: sole rate-setter and capability granter
    pub owner: HolderId,

    /// Designated null/burn identity; transfers to it are rejected
    pub null_identity: HolderId,

    /// Global rate in effect at deployment (fixed-point, `RATE_SCALE`).
    /// The rate can only decrease from here over the ledger's lifetime.
    pub initial_rate: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: HolderId::new("owner"),
            null_identity: HolderId::new("0x0"),
            initial_rate: 50_000_000_000, // 5e10
        }
    }
}

impl Config {
    /// Load from TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(owner) = std::env::var("LEDGER_OWNER") {
            config.owner = HolderId::new(owner);
        }

        if let Ok(null_identity) = std::env::var("LEDGER_NULL_IDENTITY") {
            config.null_identity = HolderId::new(null_identity);
        }

        if let Ok(rate) = std::env::var("LEDGER_INITIAL_RATE") {
            config.initial_rate = rate
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid LEDGER_INITIAL_RATE: {}", e)))?;
        }

        Ok(config)
    }
}
