//! Outbound and inbound bridging against a local ledger

use crate::{payload::Payload, Error, Result};
use accrual_ledger::{HolderId, Ledger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Outbound message envelope handed to the relay layer
///
/// The relay is assumed to deliver eventually, at most once, with the exact
/// payload sent; nothing here retries or sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Message ID (UUIDv7 for time-ordering)
    pub id: Uuid,

    /// Token identifier on the destination ledger
    pub destination_token: String,

    /// Wire payload: amount and locked rate as 32-byte big-endian words
    pub payload: Vec<u8>,

    /// Local commit timestamp
    pub created_at: DateTime<Utc>,
}

impl OutboundMessage {
    /// Serialize envelope to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize envelope from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Bridge adapter bound to one ledger instance
///
/// `identity` must hold the mint/burn capability on that ledger.
pub struct BridgeAdapter {
    /// Local ledger
    ledger: Arc<Ledger>,

    /// Capability identity the adapter acts as
    identity: HolderId,

    /// Token identifier on the destination ledger
    destination_token: String,
}

impl BridgeAdapter {
    /// Create an adapter for `ledger` acting as `identity`
    pub fn new(ledger: Arc<Ledger>, identity: HolderId, destination_token: impl Into<String>) -> Self {
        Self {
            ledger,
            identity,
            destination_token: destination_token.into(),
        }
    }

    /// Burn `amount` of `holder`'s balance locally and package it for the
    /// destination ledger.
    ///
    /// The holder's locked rate is read before the burn and carried in the
    /// payload verbatim. `MAX_AMOUNT` resolves to the holder's full settled
    /// balance.
    pub fn outbound(&self, holder: &HolderId, amount: u64) -> Result<OutboundMessage> {
        let rate = self.ledger.holder_rate(holder);
        let burned = self.ledger.burn(&self.identity, holder, amount)?;

        let payload = Payload {
            amount: burned,
            rate,
        };
        tracing::info!(
            holder = %holder,
            amount = burned,
            rate,
            destination = %self.destination_token,
            "outbound bridge transfer"
        );

        Ok(OutboundMessage {
            id: Uuid::now_v7(),
            destination_token: self.destination_token.clone(),
            payload: payload.encode().to_vec(),
            created_at: Utc::now(),
        })
    }

    /// Credit an inbound transfer: decode the carried rate and mint at
    /// exactly that rate.
    ///
    /// Returns the amount credited. Malformed payloads reject the credit.
    pub fn inbound(&self, receiver: &HolderId, payload: &[u8]) -> Result<u64> {
        let decoded = Payload::decode(payload)?;
        self.ledger
            .mint(&self.identity, receiver, decoded.amount, decoded.rate)?;

        tracing::info!(
            receiver = %receiver,
            amount = decoded.amount,
            rate = decoded.rate,
            "inbound bridge credit"
        );
        Ok(decoded.amount)
    }
}
