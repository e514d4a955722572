//! TokenTrail Audit Ledger
//!
//! A sparse store of cumulative audit counters keyed by
//! (scope, configuration id, holder). Absent keys read as the all-zero
//! record, so callers never distinguish "never written" from "written
//! with zero".
//!
//! ## Key Components
//!
//! - [`record::AuditRecord`] - One counter set: first/last write
//!   timestamps per direction plus cumulated emission/reception volumes
//! - [`record::FieldSet`] - Mask selecting which record fields a
//!   configuration is permitted to mutate
//! - [`key::RecordKey`] - Composite map key (scope, config, holder)
//! - [`store::AuditLedger`] - The keyed map with all-or-nothing batch
//!   commit and bulk scope reset

pub mod error;
pub mod key;
pub mod record;
pub mod store;

pub use error::{LedgerError, LedgerResult};
pub use key::{HolderKey, RecordKey, StorageMode};
pub use record::{AuditRecord, Direction, FieldSet};
pub use store::{AuditLedger, PlannedWrite};
