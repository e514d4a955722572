//! Capability traits for external collaborators.
//!
//! Rules, the lock registry, and the freeze registry are owned by other
//! subsystems; the pipeline consumes them read-only through these
//! traits. All calls are synchronous and in-process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tokentrail_core::Address;

use crate::context::TransferContext;

/// A half-open lock window `[start_at, end_at)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockWindow {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl LockWindow {
    pub fn new(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self { start_at, end_at }
    }

    /// True while `now` falls inside the window
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.start_at <= now && now < self.end_at
    }
}

/// An external transfer rule: a single boolean predicate.
///
/// Any number may be attached; they are evaluated in attachment order
/// and the first failure rejects the transfer with code `RULE`.
pub trait TransferRule: Send + Sync {
    /// Rule name for logging
    fn name(&self) -> &str;

    /// Return false to reject the transfer
    fn is_valid(&self, ctx: &TransferContext) -> bool;
}

/// Lock registry capability, consumed read-only
pub trait LockProvider: Send + Sync {
    /// The lock window applying to this pair, if any
    fn lock_window(&self, sender: &Address, receiver: &Address) -> Option<LockWindow>;
}

/// Freeze registry capability, consumed read-only
pub trait FreezeProvider: Send + Sync {
    /// The instant an address is frozen until, if it is frozen at all
    fn frozen_until(&self, address: &Address) -> Option<DateTime<Utc>>;
}

/// A rule accepting everything (for tests and as a wiring placeholder)
pub struct AcceptAllRule;

impl TransferRule for AcceptAllRule {
    fn name(&self) -> &str {
        "AcceptAll"
    }

    fn is_valid(&self, _ctx: &TransferContext) -> bool {
        true
    }
}

/// A lock provider with no windows
pub struct NoLocks;

impl LockProvider for NoLocks {
    fn lock_window(&self, _sender: &Address, _receiver: &Address) -> Option<LockWindow> {
        None
    }
}

/// A freeze provider with no frozen addresses
pub struct NoFreezes;

impl FreezeProvider for NoFreezes {
    fn frozen_until(&self, _address: &Address) -> Option<DateTime<Utc>> {
        None
    }
}
