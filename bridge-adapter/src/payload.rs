//! Wire payload for cross-ledger transfers
//!
//! The payload is two 32-byte big-endian words, `amount` then `encodedRate`,
//! and must be bit-exact across ledgers. Values fit in `u64`; the upper 24
//! bytes of each word are zero on encode and must be zero on decode. Anything
//! else fails closed: crediting at the wrong rate is an economic error, not a
//! recoverable one.

use crate::{Error, Result};

/// Width of one big-endian word on the wire
const WORD_LEN: usize = 32;

/// Total payload length in bytes: `amount` word followed by `rate` word
pub const PAYLOAD_LEN: usize = 2 * WORD_LEN;

/// Decoded bridge payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    /// Principal moved across ledgers (projected interest never travels)
    pub amount: u64,

    /// Sender's locked rate at time of burn (fixed-point, `RATE_SCALE`)
    pub rate: u64,
}

impl Payload {
    /// Encode to the fixed wire representation
    pub fn encode(&self) -> [u8; PAYLOAD_LEN] {
        let mut bytes = [0u8; PAYLOAD_LEN];
        bytes[WORD_LEN - 8..WORD_LEN].copy_from_slice(&self.amount.to_be_bytes());
        bytes[PAYLOAD_LEN - 8..].copy_from_slice(&self.rate.to_be_bytes());
        bytes
    }

    /// Decode from wire bytes, failing closed on anything malformed
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PAYLOAD_LEN {
            return Err(Error::Malformed(format!(
                "expected {} bytes, got {}",
                PAYLOAD_LEN,
                bytes.len()
            )));
        }

        let amount = decode_word(&bytes[..WORD_LEN], "amount")?;
        let rate = decode_word(&bytes[WORD_LEN..], "rate")?;
        Ok(Self { amount, rate })
    }
}

/// Read one 32-byte big-endian word into a `u64`, rejecting values outside
/// the representable range.
fn decode_word(word: &[u8], field: &str) -> Result<u64> {
    if word[..WORD_LEN - 8].iter().any(|&b| b != 0) {
        return Err(Error::Malformed(format!("{} exceeds u64 range", field)));
    }
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&word[WORD_LEN - 8..]);
    Ok(u64::from_be_bytes(tail))
}
