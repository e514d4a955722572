//! Engine wiring and administrative surface.
//!
//! [`AuditEngine`] owns the policy registry and the audit ledger, and
//! holds its collaborators (identity resolver, rates providers, lock and
//! freeze registries, rules) behind capability traits. The read path
//! lives in [`crate::pipeline`], the write path in [`crate::update`].

use std::collections::HashMap;
use std::sync::Arc;

use tokentrail_core::{Address, ConfigId};
use tokentrail_ledger::{AuditLedger, AuditRecord, HolderKey, RecordKey, StorageMode};
use tokentrail_oracle::{IdentityResolver, RatesProvider};
use tokentrail_policy::{AuditConfiguration, PolicyRegistry, ScopeAnchor};

use crate::config::EngineConfig;
use crate::context::TransferContext;
use crate::error::EngineResult;
use crate::traits::{FreezeProvider, LockProvider, TransferRule};

/// The audit & transfer-compliance engine.
///
/// Shared state (ledger, registry, triggers) is mutated only through the
/// administrative methods and [`apply_transfer_audit`]; the validation
/// pipeline only reads. The single `&mut self` write entry point makes
/// reentrant updates unrepresentable.
///
/// [`apply_transfer_audit`]: AuditEngine::apply_transfer_audit
pub struct AuditEngine {
    pub(crate) config: EngineConfig,
    pub(crate) registry: PolicyRegistry,
    pub(crate) ledger: AuditLedger,
    pub(crate) identity: Arc<dyn IdentityResolver>,
    pub(crate) providers: HashMap<String, Arc<dyn RatesProvider>>,
    pub(crate) locks: Arc<dyn LockProvider>,
    pub(crate) freezes: Arc<dyn FreezeProvider>,
    pub(crate) rules: Vec<Arc<dyn TransferRule>>,
}

impl AuditEngine {
    /// Create an engine with no locks, no freezes, and no rules attached
    pub fn new(config: EngineConfig, identity: Arc<dyn IdentityResolver>) -> Self {
        Self {
            config,
            registry: PolicyRegistry::new(),
            ledger: AuditLedger::new(),
            identity,
            providers: HashMap::new(),
            locks: Arc::new(crate::traits::NoLocks),
            freezes: Arc::new(crate::traits::NoFreezes),
            rules: Vec::new(),
        }
    }

    /// Attach a lock registry
    pub fn with_locks(mut self, locks: Arc<dyn LockProvider>) -> Self {
        self.locks = locks;
        self
    }

    /// Attach a freeze registry
    pub fn with_freezes(mut self, freezes: Arc<dyn FreezeProvider>) -> Self {
        self.freezes = freezes;
        self
    }

    /// Register a named rates provider configurations can reference
    pub fn register_rates_provider(&mut self, name: impl Into<String>, provider: Arc<dyn RatesProvider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Attach a transfer rule; rules run in attachment order
    pub fn register_rule(&mut self, rule: Arc<dyn TransferRule>) {
        self.rules.push(rule);
    }

    // === Administrative surface (consumed by governance tooling) ===

    /// Register or replace an audit configuration
    pub fn define_configuration(&mut self, cfg: AuditConfiguration) -> EngineResult<()> {
        self.registry.define_configuration(cfg)?;
        Ok(())
    }

    /// Register, replace, or clear a trigger for a pair
    pub fn define_trigger(
        &mut self,
        config: ConfigId,
        sender: Address,
        receiver: Address,
        as_sender: bool,
        as_receiver: bool,
    ) -> EngineResult<()> {
        self.registry
            .define_trigger(config, sender, receiver, as_sender, as_receiver)?;
        Ok(())
    }

    /// Bulk-delete every record filed under (scope, configuration)
    pub fn reset_scope(&mut self, scope: &Address, config: ConfigId) -> usize {
        self.ledger.reset_scope(scope, config)
    }

    // === Read-only introspection (consumed by reporting tools) ===

    /// Read a ledger record; absent keys return the zero record
    pub fn audit_record(&self, key: &RecordKey) -> AuditRecord {
        self.ledger.get(key)
    }

    /// The policy registry
    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The audit ledger
    pub fn ledger(&self) -> &AuditLedger {
        &self.ledger
    }

    // === Shared resolution helpers ===

    /// The scope a configuration files records under for a given token
    pub(crate) fn scope_for(&self, cfg: &AuditConfiguration, token: &Address) -> Address {
        match cfg.scope_anchor {
            ScopeAnchor::PerToken => token.clone(),
            ScopeAnchor::Aggregate => self.config.aggregate_scope.clone(),
        }
    }

    /// The holder key for a party: the resolved identity id when the
    /// configuration prefers identity keying and one is registered,
    /// else the raw address.
    pub(crate) fn holder_for(&self, cfg: &AuditConfiguration, address: &Address) -> HolderKey {
        if cfg.keyed_by == StorageMode::ByIdentity {
            if let Some(identity) = self.identity.resolve(address) {
                return HolderKey::Identity(identity.id);
            }
        }
        HolderKey::Address(address.clone())
    }

    /// Normalize the transferred amount into a configuration's reference
    /// currency; `None` means no valid rate (or no such provider).
    pub(crate) fn normalize(
        &self,
        cfg: &AuditConfiguration,
        ctx: &TransferContext,
    ) -> Option<tokentrail_core::Amount> {
        if !cfg.needs_rate(&ctx.token_currency) {
            return Some(ctx.amount);
        }
        let provider = self.providers.get(&cfg.rates_provider)?;
        provider.convert(ctx.amount, &ctx.token_currency, &cfg.reference_currency)
    }
}
