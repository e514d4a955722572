//! Policy errors

use thiserror::Error;

use tokentrail_core::ConfigId;

/// Errors from the policy registry
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Unknown configuration: {0}")]
    UnknownConfiguration(ConfigId),

    #[error("Invalid configuration {id}: {reason}")]
    InvalidConfiguration { id: ConfigId, reason: String },
}

/// Result type for policy operations
pub type PolicyResult<T> = Result<T, PolicyError>;
