//! Ledger errors

use thiserror::Error;

/// Errors from the audit ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Cumulated {field} overflow")]
    Overflow { field: &'static str },
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
