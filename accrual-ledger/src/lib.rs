//! Elastra Accrual Ledger
//!
//! Interest-accruing fungible-asset ledger with per-holder locked rates.
//!
//! # Architecture
//!
//! - **Lazy accrual**: Interest is never materialized until an interaction;
//!   balances are derived on demand from principal, locked rate, and elapsed time
//! - **Single settlement routine**: Every balance-mutating path folds accrued
//!   interest into principal through one routine before touching principal
//! - **Capability checks**: Mint/burn is gated on an explicit capability set,
//!   rate changes on the configured owner
//!
//! # Invariants
//!
//! - Monotone rate: the global rate never increases across its history
//! - Settlement precedes mutation: principal is never read or written with
//!   unsettled interest outstanding
//! - First-funding capture: a holder's locked rate is fixed the moment their
//!   balance leaves zero, not at account creation
//! - All-or-nothing: failed operations leave no observable state change

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod types;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use ledger::Ledger;
pub use types::{HolderAccount, HolderId, MAX_AMOUNT, RATE_SCALE, UNLIMITED_ALLOWANCE};
