//! Audit configurations.
//!
//! A configuration describes what one policy tracks: which of the up to
//! three records per transfer it maintains, which record fields it owns,
//! how per-party records are keyed, which currency it accumulates in,
//! and the default firing mode that triggers override.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use tokentrail_core::{Amount, ConfigId, Currency};
use tokentrail_ledger::{FieldSet, StorageMode};

use crate::error::{PolicyError, PolicyResult};

/// Name of the rates provider used when a configuration does not name one
pub const DEFAULT_RATES_PROVIDER: &str = "default";

/// Default firing policy absent an explicit trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditMode {
    /// Never audit, regardless of triggers
    Never,
    /// Audit only pairs with a matching trigger
    TriggersOnly,
    /// Audit every pair except those with a matching trigger
    TriggersExcluded,
    /// Always audit, regardless of triggers
    Always,
}

/// Whether records are filed under the token itself or under a shared
/// aggregation point spanning every token one authority manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeAnchor {
    PerToken,
    Aggregate,
}

/// One audit policy.
///
/// Long-lived administrative state, created and updated out-of-band and
/// read on every transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfiguration {
    pub id: ConfigId,
    pub scope_anchor: ScopeAnchor,
    pub mode: AuditMode,

    /// Maintain the scope-wide shared record
    pub track_shared: bool,
    /// Maintain the sender-keyed record
    pub track_sender: bool,
    /// Maintain the receiver-keyed record
    pub track_receiver: bool,

    /// Preferred keying for per-party records; `ByIdentity` falls back
    /// to the raw address when no identity is registered
    pub keyed_by: StorageMode,
    /// The record fields this configuration is permitted to mutate
    pub updated_fields: FieldSet,

    /// Name of the registered rates provider used for normalization
    pub rates_provider: String,
    /// Currency amounts are normalized into before accumulation
    pub reference_currency: Currency,

    /// Reject transfers that would push a sender's cumulated emission
    /// past this, in the reference currency
    pub emission_limit: Option<Amount>,
    /// Reject transfers that would push a receiver's cumulated reception
    /// past this, in the reference currency
    pub reception_limit: Option<Amount>,
}

impl AuditConfiguration {
    /// Create a configuration tracking nothing; chain `with_*` calls to
    /// select records, fields, keying, and limits.
    pub fn new(id: ConfigId, mode: AuditMode, reference_currency: Currency) -> Self {
        Self {
            id,
            scope_anchor: ScopeAnchor::PerToken,
            mode,
            track_shared: false,
            track_sender: false,
            track_receiver: false,
            keyed_by: StorageMode::ByAddress,
            updated_fields: FieldSet::ALL,
            rates_provider: DEFAULT_RATES_PROVIDER.to_string(),
            reference_currency,
            emission_limit: None,
            reception_limit: None,
        }
    }

    /// Select which of the shared / sender / receiver records to maintain
    pub fn with_tracking(mut self, shared: bool, sender: bool, receiver: bool) -> Self {
        self.track_shared = shared;
        self.track_sender = sender;
        self.track_receiver = receiver;
        self
    }

    /// File records under the shared aggregation anchor instead of the
    /// token
    pub fn with_scope_anchor(mut self, anchor: ScopeAnchor) -> Self {
        self.scope_anchor = anchor;
        self
    }

    /// Set the preferred keying for per-party records
    pub fn with_keying(mut self, keyed_by: StorageMode) -> Self {
        self.keyed_by = keyed_by;
        self
    }

    /// Restrict the record fields this configuration owns
    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.updated_fields = fields;
        self
    }

    /// Name the rates provider used for normalization
    pub fn with_rates_provider(mut self, name: impl Into<String>) -> Self {
        self.rates_provider = name.into();
        self
    }

    /// Set emission and/or reception limits in the reference currency
    pub fn with_limits(mut self, emission: Option<Amount>, reception: Option<Amount>) -> Self {
        self.emission_limit = emission;
        self.reception_limit = reception;
        self
    }

    /// True when this configuration enforces any cumulated limit
    pub fn has_limits(&self) -> bool {
        self.emission_limit.is_some() || self.reception_limit.is_some()
    }

    /// True when normalizing into the reference currency requires a
    /// stored rate for the given token unit
    pub fn needs_rate(&self, token_currency: &Currency) -> bool {
        self.reference_currency != *token_currency
    }

    /// True when the configuration maintains any record at all
    pub fn tracks_anything(&self) -> bool {
        self.track_shared || self.track_sender || self.track_receiver
    }

    /// Validate internal consistency before registration
    pub fn validate(&self) -> PolicyResult<()> {
        if self.keyed_by == StorageMode::Shared {
            return Err(PolicyError::InvalidConfiguration {
                id: self.id,
                reason: "keyed_by must be BY_IDENTITY or BY_ADDRESS".to_string(),
            });
        }

        if self.tracks_anything() && self.updated_fields.is_empty() {
            return Err(PolicyError::InvalidConfiguration {
                id: self.id,
                reason: "tracking records with an empty field mask".to_string(),
            });
        }

        if self.rates_provider.is_empty() {
            return Err(PolicyError::InvalidConfiguration {
                id: self.id,
                reason: "empty rates provider name".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tkn() -> Currency {
        Currency::Token("TKN".to_string())
    }

    #[test]
    fn test_builder_defaults() {
        let cfg = AuditConfiguration::new(ConfigId(0), AuditMode::Always, tkn());

        assert_eq!(cfg.scope_anchor, ScopeAnchor::PerToken);
        assert!(!cfg.tracks_anything());
        assert_eq!(cfg.keyed_by, StorageMode::ByAddress);
        assert_eq!(cfg.updated_fields, FieldSet::ALL);
        assert_eq!(cfg.rates_provider, DEFAULT_RATES_PROVIDER);
        assert!(!cfg.has_limits());
    }

    #[test]
    fn test_builder_chain() {
        let cfg = AuditConfiguration::new(ConfigId(1), AuditMode::TriggersOnly, Currency::Chf)
            .with_tracking(true, true, true)
            .with_scope_anchor(ScopeAnchor::Aggregate)
            .with_keying(StorageMode::ByIdentity)
            .with_fields(FieldSet::VOLUMES)
            .with_rates_provider("primary")
            .with_limits(Some(Amount::new(dec!(10000)).unwrap()), None);

        assert!(cfg.track_shared && cfg.track_sender && cfg.track_receiver);
        assert_eq!(cfg.keyed_by, StorageMode::ByIdentity);
        assert_eq!(cfg.updated_fields, FieldSet::VOLUMES);
        assert_eq!(cfg.rates_provider, "primary");
        assert!(cfg.has_limits());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_needs_rate() {
        let cfg = AuditConfiguration::new(ConfigId(0), AuditMode::Always, tkn());
        assert!(!cfg.needs_rate(&tkn()));
        assert!(cfg.needs_rate(&Currency::Token("OTHER".to_string())));

        let fiat = AuditConfiguration::new(ConfigId(1), AuditMode::Always, Currency::Chf);
        assert!(fiat.needs_rate(&tkn()));
    }

    #[test]
    fn test_validate_rejects_shared_keying() {
        let cfg = AuditConfiguration::new(ConfigId(0), AuditMode::Always, tkn())
            .with_keying(StorageMode::Shared);
        assert!(matches!(
            cfg.validate(),
            Err(PolicyError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_mask_with_tracking() {
        let cfg = AuditConfiguration::new(ConfigId(0), AuditMode::Always, tkn())
            .with_tracking(true, false, false)
            .with_fields(FieldSet::NONE);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(AuditMode::TriggersExcluded.to_string(), "TRIGGERS_EXCLUDED");
        assert_eq!(ScopeAnchor::PerToken.to_string(), "PER_TOKEN");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let cfg = AuditConfiguration::new(ConfigId(2), AuditMode::TriggersExcluded, Currency::Eur)
            .with_tracking(true, false, true)
            .with_limits(None, Some(Amount::new(dec!(500)).unwrap()));

        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: AuditConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }
}
