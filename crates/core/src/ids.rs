//! Identifier newtypes: addresses, identity ids, configuration ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing addresses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Empty address")]
    Empty,

    #[error("Address too long (max 64 chars): {0}")]
    TooLong(String),

    #[error("Invalid address format: {0}")]
    InvalidFormat(String),
}

/// An account or contract address.
///
/// Addresses are opaque to the engine: they key ledger records, trigger
/// entries, and lock/freeze state, and resolve to identities through the
/// oracle gateway. Validation only rejects obviously malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Create a new address, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, AddressError> {
        let s = s.into();

        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        if s.len() > 64 {
            return Err(AddressError::TooLong(s));
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
        {
            return Err(AddressError::InvalidFormat(s));
        }

        Ok(Self(s))
    }

    /// Create an address without validation.
    ///
    /// The caller must ensure the value satisfies the address format.
    /// Use only for trusted sources such as compiled-in defaults.
    pub fn new_unchecked(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

/// A registered identity id resolved from an address by the oracle
/// gateway. Distinct addresses can share one identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct IdentityId(pub u64);

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An audit configuration id. Part of every ledger record key, so the
/// same address can carry independent counters under different policies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ConfigId(pub u32);

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_valid() {
        let addr = Address::new("0xA1b2-c3.d4:e5_f6").unwrap();
        assert_eq!(addr.as_str(), "0xA1b2-c3.d4:e5_f6");
    }

    #[test]
    fn test_address_empty_rejected() {
        assert!(matches!(Address::new(""), Err(AddressError::Empty)));
    }

    #[test]
    fn test_address_too_long_rejected() {
        let long = "a".repeat(65);
        assert!(matches!(Address::new(long), Err(AddressError::TooLong(_))));
    }

    #[test]
    fn test_address_invalid_chars_rejected() {
        assert!(matches!(
            Address::new("bad address"),
            Err(AddressError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_address_parse() {
        let addr: Address = "alice".parse().unwrap();
        assert_eq!(addr.to_string(), "alice");
    }

    #[test]
    fn test_address_serde_roundtrip() {
        let addr = Address::new("alice").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"alice\"");
        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_identity_id_display() {
        assert_eq!(IdentityId(7).to_string(), "7");
    }

    #[test]
    fn test_config_id_serde_transparent() {
        let id = ConfigId(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
    }
}
