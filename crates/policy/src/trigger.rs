//! Per-pair trigger overrides.

use serde::{Deserialize, Serialize};

/// An explicit override for one (configuration, sender, receiver) pair.
///
/// Each role is flagged independently: a pair can be a designated
/// trigger when the first address sends, when the second receives, both,
/// or neither. An entry with both flags false carries no information and
/// is removed on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrigger {
    /// The pair matches when resolving the sender role
    pub as_sender: bool,
    /// The pair matches when resolving the receiver role
    pub as_receiver: bool,
}

impl AuditTrigger {
    pub fn new(as_sender: bool, as_receiver: bool) -> Self {
        Self {
            as_sender,
            as_receiver,
        }
    }

    /// True when the entry designates neither role
    pub fn is_empty(&self) -> bool {
        !self.as_sender && !self.as_receiver
    }

    /// True when either role matches
    pub fn matches_any_role(&self) -> bool {
        self.as_sender || self.as_receiver
    }
}
