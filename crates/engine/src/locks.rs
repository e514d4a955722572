//! In-process lock and freeze tables.
//!
//! Default implementations of the lock/freeze capabilities for
//! deployments that keep that state next to the engine. State is
//! settable behind interior mutability so governance tooling (and
//! tests) can flip it without rebuilding the engine wiring.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use tokentrail_core::Address;

use crate::traits::{FreezeProvider, LockProvider, LockWindow};

/// Lock table with wildcard pairs.
///
/// An entry keys on `(Option<sender>, Option<receiver>)`; `None` is the
/// wildcard matching any address in that role. Lookup precedence:
/// exact pair, then sender-only, then receiver-only, then the global
/// wildcard.
#[derive(Debug, Default)]
pub struct LockTable {
    windows: RwLock<HashMap<(Option<Address>, Option<Address>), LockWindow>>,
}

impl LockTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a lock window for a pair (or wildcard)
    pub fn set_lock(
        &self,
        sender: Option<Address>,
        receiver: Option<Address>,
        window: LockWindow,
    ) {
        let mut windows = self.windows.write().unwrap();
        windows.insert((sender, receiver), window);
    }

    /// Remove a lock entry
    pub fn clear_lock(&self, sender: Option<Address>, receiver: Option<Address>) {
        let mut windows = self.windows.write().unwrap();
        windows.remove(&(sender, receiver));
    }

    /// Number of lock entries
    pub fn len(&self) -> usize {
        self.windows.read().unwrap().len()
    }

    /// True when no lock entry exists
    pub fn is_empty(&self) -> bool {
        self.windows.read().unwrap().is_empty()
    }
}

impl LockProvider for LockTable {
    fn lock_window(&self, sender: &Address, receiver: &Address) -> Option<LockWindow> {
        let windows = self.windows.read().unwrap();

        let candidates = [
            (Some(sender.clone()), Some(receiver.clone())),
            (Some(sender.clone()), None),
            (None, Some(receiver.clone())),
            (None, None),
        ];

        candidates
            .iter()
            .find_map(|key| windows.get(key).copied())
    }
}

/// Freeze table: per-address freeze horizon
#[derive(Debug, Default)]
pub struct FreezeTable {
    frozen: RwLock<HashMap<Address, DateTime<Utc>>>,
}

impl FreezeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze an address until the given instant
    pub fn set_frozen(&self, address: Address, until: DateTime<Utc>) {
        let mut frozen = self.frozen.write().unwrap();
        frozen.insert(address, until);
    }

    /// Unfreeze an address
    pub fn clear_frozen(&self, address: &Address) {
        let mut frozen = self.frozen.write().unwrap();
        frozen.remove(address);
    }
}

impl FreezeProvider for FreezeTable {
    fn frozen_until(&self, address: &Address) -> Option<DateTime<Utc>> {
        let frozen = self.frozen.read().unwrap();
        frozen.get(address).copied()
    }
}
