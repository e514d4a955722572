//! Engine errors.
//!
//! These are infrastructure failures, distinct from policy rejections:
//! a policy rejection is a [`crate::TransferCode`] returned by the read
//! path, while an `EngineError` aborts the write path with no partial
//! ledger state.

use thiserror::Error;

use tokentrail_ledger::LedgerError;
use tokentrail_oracle::OracleError;
use tokentrail_policy::PolicyError;

/// Infrastructure failures of the audit engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Oracle failure: {0}")]
    Oracle(#[from] OracleError),

    #[error("Ledger failure: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Policy failure: {0}")]
    Policy(#[from] PolicyError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
