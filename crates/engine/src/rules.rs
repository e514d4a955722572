//! Shipped transfer rules.
//!
//! Rules are external collaborators in principle; these two cover the
//! common in-process cases: a hard per-transfer cap and a deny list.

use std::collections::HashSet;
use std::sync::RwLock;

use tokentrail_core::{Address, Amount};

use crate::context::TransferContext;
use crate::traits::TransferRule;

/// Rejects any single transfer above a fixed amount in token units
pub struct MaxAmountRule {
    limit: Amount,
}

impl MaxAmountRule {
    pub fn new(limit: Amount) -> Self {
        Self { limit }
    }
}

impl TransferRule for MaxAmountRule {
    fn name(&self) -> &str {
        "MaxAmount"
    }

    fn is_valid(&self, ctx: &TransferContext) -> bool {
        ctx.amount <= self.limit
    }
}

/// Rejects transfers where either party is on the deny list
#[derive(Default)]
pub struct DenyListRule {
    denied: RwLock<HashSet<Address>>,
}

impl DenyListRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address to the deny list
    pub fn deny(&self, address: Address) {
        let mut denied = self.denied.write().unwrap();
        denied.insert(address);
    }

    /// Remove an address from the deny list
    pub fn allow(&self, address: &Address) {
        let mut denied = self.denied.write().unwrap();
        denied.remove(address);
    }
}

impl TransferRule for DenyListRule {
    fn name(&self) -> &str {
        "DenyList"
    }

    fn is_valid(&self, ctx: &TransferContext) -> bool {
        let denied = self.denied.read().unwrap();
        !denied.contains(&ctx.sender) && !denied.contains(&ctx.receiver)
    }
}
