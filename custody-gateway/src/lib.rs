//! Elastra Custody Gateway
//!
//! Thin deposit/redeem shim wrapping native-currency custody around the
//! ledger's mint/burn entry points. The gateway never touches balance
//! bookkeeping directly; it keeps custodial collateral in lockstep with the
//! liabilities the ledger records.
//!
//! # Invariants
//!
//! - A deposit credits collateral and mints the same amount at the current
//!   global rate
//! - A redeem burns first, then releases collateral; if the release fails the
//!   burn is rolled back, so a burn is never observably committed without the
//!   matching release

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod error;
pub mod gateway;
pub mod vault;

// Re-exports
pub use error::{Error, Result};
pub use gateway::Gateway;
pub use vault::{CollateralVault, InMemoryVault};
