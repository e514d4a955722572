//! The audit update procedure.
//!
//! [`AuditEngine::apply_transfer_audit`] runs after a transfer has
//! settled: for every configuration that fires on the pair it resolves
//! scope, keys, and the normalized delta, then commits the whole fan-out
//! through one atomic ledger batch. Validation is the caller's job
//! (run [`AuditEngine::can_transfer`] first); this path only fails on
//! infrastructure errors, and a failure leaves the ledger untouched.

use tracing::{debug, trace};

use tokentrail_ledger::{Direction, PlannedWrite, RecordKey};
use tokentrail_oracle::OracleError;
use tokentrail_policy::AuditConfiguration;

use crate::context::TransferContext;
use crate::engine::AuditEngine;
use crate::error::EngineResult;

impl AuditEngine {
    /// Record a settled transfer in every firing configuration's records.
    pub fn apply_transfer_audit(&mut self, ctx: &TransferContext) -> EngineResult<()> {
        let configs: Vec<AuditConfiguration> = self.registry.configurations().cloned().collect();
        let mut writes = Vec::new();

        for cfg in &configs {
            if !self.registry.audit_fires(cfg.id, &ctx.sender, &ctx.receiver) {
                trace!(config = %cfg.id, "Configuration does not fire");
                continue;
            }
            if !cfg.tracks_anything() {
                continue;
            }

            let normalized = self.normalize_required(cfg, ctx)?;
            let scope = self.scope_for(cfg, &ctx.token);

            if cfg.track_shared {
                let key = RecordKey::shared(scope.clone(), cfg.id);
                // The shared record counts both sides of the transfer
                writes.push(PlannedWrite {
                    key: key.clone(),
                    direction: Direction::Emission,
                    delta: normalized,
                    fields: cfg.updated_fields,
                    at: ctx.now,
                });
                writes.push(PlannedWrite {
                    key,
                    direction: Direction::Reception,
                    delta: normalized,
                    fields: cfg.updated_fields,
                    at: ctx.now,
                });
            }

            if cfg.track_sender {
                writes.push(PlannedWrite {
                    key: RecordKey::new(scope.clone(), cfg.id, self.holder_for(cfg, &ctx.sender)),
                    direction: Direction::Emission,
                    delta: normalized,
                    fields: cfg.updated_fields,
                    at: ctx.now,
                });
            }

            if cfg.track_receiver {
                writes.push(PlannedWrite {
                    key: RecordKey::new(scope, cfg.id, self.holder_for(cfg, &ctx.receiver)),
                    direction: Direction::Reception,
                    delta: normalized,
                    fields: cfg.updated_fields,
                    at: ctx.now,
                });
            }

            debug!(config = %cfg.id, delta = %normalized, "Audit configuration fired");
        }

        self.ledger.apply_all(&writes)?;
        Ok(())
    }

    /// Like [`AuditEngine::normalize`] but a missing provider or rate is
    /// an error: the write path must not silently drop a firing
    /// configuration's records.
    fn normalize_required(
        &self,
        cfg: &AuditConfiguration,
        ctx: &TransferContext,
    ) -> EngineResult<tokentrail_core::Amount> {
        if !cfg.needs_rate(&ctx.token_currency) {
            return Ok(ctx.amount);
        }

        let provider = self.providers.get(&cfg.rates_provider).ok_or_else(|| {
            OracleError::ProviderNotRegistered {
                name: cfg.rates_provider.clone(),
            }
        })?;

        provider
            .convert(ctx.amount, &ctx.token_currency, &cfg.reference_currency)
            .ok_or_else(|| {
                OracleError::RateUnavailable {
                    from: ctx.token_currency.to_string(),
                    to: cfg.reference_currency.to_string(),
                }
                .into()
            })
    }
}
