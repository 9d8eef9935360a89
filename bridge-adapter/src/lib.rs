//! Elastra Bridge Adapter
//!
//! Translates a local burn into a cross-ledger mint while preserving the
//! holder's locked rate end-to-end.
//!
//! # Architecture
//!
//! - **Outbound**: capture the holder's locked rate, burn principal on the
//!   source ledger, package `(amount, rate)` into a bit-exact wire payload
//! - **Inbound**: decode the carried rate and mint at exactly that rate on
//!   the destination ledger; the destination's own global rate is irrelevant
//! - **Fail closed**: a malformed inbound payload rejects the credit rather
//!   than falling back to a default rate
//!
//! Delivery between ledgers is asynchronous at the system level: outbound
//! commits locally and immediately, independent of whether or when the paired
//! inbound arrives.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod adapter;
pub mod error;
pub mod payload;

// Re-exports
pub use adapter::{BridgeAdapter, OutboundMessage};
pub use error::{Error, Result};
pub use payload::{Payload, PAYLOAD_LEN};
