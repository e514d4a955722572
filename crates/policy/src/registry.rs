//! Configuration and trigger registry.
//!
//! Owns the ordered configuration list and the trigger table, and
//! resolves the effective firing decision: the configuration's default
//! mode combined with the per-pair trigger override, per role.

use std::collections::{BTreeMap, HashMap};

use tokentrail_core::{Address, ConfigId};

use crate::config::{AuditConfiguration, AuditMode};
use crate::error::{PolicyError, PolicyResult};
use crate::trigger::AuditTrigger;

/// Registry of audit configurations and their trigger overrides.
///
/// Administrative writes come from governance tooling; the engine only
/// reads. Configurations iterate in id order so the audit update
/// procedure is deterministic.
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    configurations: BTreeMap<ConfigId, AuditConfiguration>,
    triggers: HashMap<(ConfigId, Address, Address), AuditTrigger>,
}

impl PolicyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a configuration.
    pub fn define_configuration(&mut self, cfg: AuditConfiguration) -> PolicyResult<()> {
        cfg.validate()?;

        tracing::debug!(config = %cfg.id, mode = %cfg.mode, "Configuration defined");
        self.configurations.insert(cfg.id, cfg);
        Ok(())
    }

    /// Look up a configuration
    pub fn configuration(&self, id: ConfigId) -> Option<&AuditConfiguration> {
        self.configurations.get(&id)
    }

    /// Iterate configurations in id order
    pub fn configurations(&self) -> impl Iterator<Item = &AuditConfiguration> {
        self.configurations.values()
    }

    /// Number of registered configurations
    pub fn configuration_count(&self) -> usize {
        self.configurations.len()
    }

    /// Register, replace, or clear a trigger for a pair.
    ///
    /// The configuration must exist. Writing both flags false removes
    /// the entry: a stored all-false trigger would be indistinguishable
    /// from no entry, so none is kept.
    pub fn define_trigger(
        &mut self,
        config: ConfigId,
        sender: Address,
        receiver: Address,
        as_sender: bool,
        as_receiver: bool,
    ) -> PolicyResult<()> {
        if !self.configurations.contains_key(&config) {
            return Err(PolicyError::UnknownConfiguration(config));
        }

        let trigger = AuditTrigger::new(as_sender, as_receiver);
        tracing::debug!(
            config = %config,
            sender = %sender,
            receiver = %receiver,
            ?trigger,
            "Trigger defined"
        );

        if trigger.is_empty() {
            self.triggers.remove(&(config, sender, receiver));
        } else {
            self.triggers.insert((config, sender, receiver), trigger);
        }
        Ok(())
    }

    /// The stored trigger for a pair, if any
    pub fn trigger(
        &self,
        config: ConfigId,
        sender: &Address,
        receiver: &Address,
    ) -> Option<AuditTrigger> {
        self.triggers
            .get(&(config, sender.clone(), receiver.clone()))
            .copied()
    }

    /// Whether the pair counts as a trigger match: sender-role match or
    /// receiver-role match on the stored entry.
    pub fn is_trigger(&self, config: ConfigId, sender: &Address, receiver: &Address) -> bool {
        self.trigger(config, sender, receiver)
            .is_some_and(|t| t.matches_any_role())
    }

    /// Resolve whether a configuration fires for a transfer.
    ///
    /// `Always`/`Never` ignore triggers; `TriggersOnly` fires only on a
    /// trigger match; `TriggersExcluded` fires unless the pair matches.
    /// Unknown configurations never fire.
    pub fn audit_fires(&self, config: ConfigId, sender: &Address, receiver: &Address) -> bool {
        let Some(cfg) = self.configurations.get(&config) else {
            return false;
        };

        match cfg.mode {
            AuditMode::Always => true,
            AuditMode::Never => false,
            AuditMode::TriggersOnly => self.is_trigger(config, sender, receiver),
            AuditMode::TriggersExcluded => !self.is_trigger(config, sender, receiver),
        }
    }
}
