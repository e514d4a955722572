//! Engine configuration.
//!
//! Deployment-level knobs, loadable from a JSON file with per-field
//! defaults so partial files work.

use serde::{Deserialize, Serialize};

use tokentrail_core::Address;

/// Configuration for the audit engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The scope records are filed under for `ScopeAnchor::Aggregate`
    /// configurations, shared across every token this engine manages
    #[serde(default = "default_aggregate_scope")]
    pub aggregate_scope: Address,

    /// Require both parties to hold a valid registered identity
    /// (pipeline steps NON_REGISTERED_SENDER / NON_REGISTERED_RECEIVER)
    #[serde(default = "default_enforce_identity")]
    pub enforce_identity: bool,
}

fn default_aggregate_scope() -> Address {
    Address::new_unchecked("audit-aggregate")
}

fn default_enforce_identity() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aggregate_scope: default_aggregate_scope(),
            enforce_identity: default_enforce_identity(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
