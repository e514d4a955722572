//! TokenTrail Engine
//!
//! The audit & transfer-compliance engine: given a prospective transfer
//! it runs an ordered, short-circuiting validation pipeline and returns
//! a stable [`code::TransferCode`]; given an accepted transfer it
//! resolves the effective policy per configuration and updates the
//! audit ledger atomically.
//!
//! ```text
//!            can_transfer (read only)
//! Transfer ──► Lock ► Frozen ► Rules ► Rate ► Identity ► Limits ──► Code
//!                 │ consults                                  ▲
//!                 ▼                                           │
//!     Locks/Freezes   Policy Registry   Oracle Gateway   Audit Ledger
//!                 ▲                                           │
//!                 │ apply_transfer_audit (write path)         ▼
//! Accepted ──► per-configuration firing ► normalize once ► 0-3 records
//! ```
//!
//! The engine is synchronous and single-threaded by design: one transfer
//! is validated and applied in full before the next begins, and the only
//! mutating entry point makes no external callbacks between its reads
//! and its staged commit.

pub mod code;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod locks;
pub mod pipeline;
pub mod rules;
pub mod traits;
pub mod update;

pub use code::TransferCode;
pub use config::EngineConfig;
pub use context::TransferContext;
pub use engine::AuditEngine;
pub use error::{EngineError, EngineResult};
pub use locks::{FreezeTable, LockTable};
pub use rules::{DenyListRule, MaxAmountRule};
pub use traits::{FreezeProvider, LockProvider, LockWindow, TransferRule};
