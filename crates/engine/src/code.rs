//! Transfer validation codes.
//!
//! The pipeline's outcome is a stable small integer, part of the public
//! contract consumed by the proxy/core layer and its test suite. `OK`
//! is the only non-error code.

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

/// Error raised when decoding an unknown code value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown transfer code: {0}")]
pub struct UnknownCode(pub u8);

/// Outcome of the transfer validation pipeline.
///
/// Codes are ordered by pipeline position: the first failing check wins,
/// so a transfer that is both locked and over its emission limit
/// reports `Lock`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferCode {
    /// Transfer is admissible
    Ok = 0,
    /// A lock window covers the pair right now
    Lock = 1,
    /// A party is frozen until a future timestamp
    Frozen = 2,
    /// An attached rule rejected the transfer
    Rule = 3,
    /// A firing configuration needs a conversion rate and none is valid
    InvalidRate = 4,
    /// Sender has no valid registered identity
    NonRegisteredSender = 5,
    /// Receiver has no valid registered identity
    NonRegisteredReceiver = 6,
    /// The transfer would exceed the sender's cumulated emission limit
    LimitedEmission = 7,
    /// The transfer would exceed the receiver's cumulated reception limit
    LimitedReception = 8,
}

impl TransferCode {
    /// The stable numeric code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True only for `Ok`
    pub fn is_ok(self) -> bool {
        self == TransferCode::Ok
    }
}

impl From<TransferCode> for u8 {
    fn from(code: TransferCode) -> u8 {
        code as u8
    }
}

impl TryFrom<u8> for TransferCode {
    type Error = UnknownCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => TransferCode::Ok,
            1 => TransferCode::Lock,
            2 => TransferCode::Frozen,
            3 => TransferCode::Rule,
            4 => TransferCode::InvalidRate,
            5 => TransferCode::NonRegisteredSender,
            6 => TransferCode::NonRegisteredReceiver,
            7 => TransferCode::LimitedEmission,
            8 => TransferCode::LimitedReception,
            other => return Err(UnknownCode(other)),
        })
    }
}
