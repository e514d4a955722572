//! Composite ledger keys.
//!
//! A record is filed under (scope, configuration id, holder). The scope
//! distinguishes per-token records from records shared across every
//! token managed by one authority; the configuration id lets one
//! address carry independent counters under different policies.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

use tokentrail_core::{Address, ConfigId, IdentityId};

/// How a record is keyed within its (scope, configuration) namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageMode {
    /// One record aggregating all parties
    Shared,
    /// Keyed by resolved identity id
    ByIdentity,
    /// Keyed by raw address
    ByAddress,
}

/// The holder a record belongs to, collapsing storage mode and key so
/// invalid combinations (a shared record with a key, a keyed record
/// without one) cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderKey {
    /// The scope-wide shared record
    Shared,
    /// A resolved identity
    Identity(IdentityId),
    /// A raw address, used when no identity is registered or the policy
    /// intentionally tracks addresses
    Address(Address),
}

impl HolderKey {
    /// The storage mode this holder files under
    pub fn storage_mode(&self) -> StorageMode {
        match self {
            HolderKey::Shared => StorageMode::Shared,
            HolderKey::Identity(_) => StorageMode::ByIdentity,
            HolderKey::Address(_) => StorageMode::ByAddress,
        }
    }
}

impl fmt::Display for HolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolderKey::Shared => write!(f, "shared"),
            HolderKey::Identity(id) => write!(f, "identity:{id}"),
            HolderKey::Address(addr) => write!(f, "address:{addr}"),
        }
    }
}

/// Full ledger key: (scope, configuration id, holder)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    /// The contract/domain the record belongs to (a token address or an
    /// aggregation anchor)
    pub scope: Address,
    /// The configuration that produced the write
    pub config: ConfigId,
    /// Shared, identity-keyed, or address-keyed
    pub holder: HolderKey,
}

impl RecordKey {
    pub fn new(scope: Address, config: ConfigId, holder: HolderKey) -> Self {
        Self {
            scope,
            config,
            holder,
        }
    }

    /// The scope-wide shared record key for a configuration
    pub fn shared(scope: Address, config: ConfigId) -> Self {
        Self::new(scope, config, HolderKey::Shared)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.scope, self.config, self.holder)
    }
}
