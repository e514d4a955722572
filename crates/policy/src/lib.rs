//! TokenTrail policy layer
//!
//! Holds the administrative state that decides, per transfer, which
//! ledger records move: the ordered list of
//! [`config::AuditConfiguration`]s and the per-(sender, receiver)
//! [`trigger::AuditTrigger`] overrides, combined by
//! [`registry::PolicyRegistry`] into the effective firing decision.

pub mod config;
pub mod error;
pub mod registry;
pub mod trigger;

pub use config::{AuditConfiguration, AuditMode, ScopeAnchor};
pub use error::{PolicyError, PolicyResult};
pub use registry::PolicyRegistry;
pub use trigger::AuditTrigger;
