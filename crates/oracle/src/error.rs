//! Oracle error types

use thiserror::Error;

/// Oracle-related errors, surfaced only on the audit write path where a
/// missing rate must abort the whole operation instead of producing a
/// policy code.
#[derive(Debug, Error)]
pub enum OracleError {
    /// No valid conversion rate between the two currencies
    #[error("No valid rate from {from} to {to}")]
    RateUnavailable { from: String, to: String },

    /// A configuration references a rates provider that was never
    /// registered
    #[error("Rates provider not registered: {name}")]
    ProviderNotRegistered { name: String },
}
