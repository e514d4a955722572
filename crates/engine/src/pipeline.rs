//! The transfer validation pipeline.
//!
//! [`AuditEngine::can_transfer`] runs a fixed sequence of checks and
//! short-circuits on the first failure, so a transfer blocked for
//! several reasons always reports the same code. The pipeline never
//! mutates state; calling it twice with the same context yields the
//! same code.

use tracing::debug;

use tokentrail_core::Address;
use tokentrail_ledger::RecordKey;
use tokentrail_policy::AuditConfiguration;

use crate::code::TransferCode;
use crate::context::TransferContext;
use crate::engine::AuditEngine;

impl AuditEngine {
    /// Validate a prospective transfer.
    ///
    /// Check order: lock, freezes, external rules, rate availability,
    /// sender identity, receiver identity, emission limits, reception
    /// limits. Returns [`TransferCode::Ok`] when every check passes.
    pub fn can_transfer(&self, ctx: &TransferContext) -> TransferCode {
        if let Some(window) = self.locks.lock_window(&ctx.sender, &ctx.receiver) {
            if window.contains(ctx.now) {
                debug!(sender = %ctx.sender, receiver = %ctx.receiver, "Transfer inside lock window");
                return TransferCode::Lock;
            }
        }

        for party in [&ctx.sender, &ctx.receiver] {
            if let Some(until) = self.freezes.frozen_until(party) {
                if ctx.now < until {
                    debug!(address = %party, %until, "Party is frozen");
                    return TransferCode::Frozen;
                }
            }
        }

        for rule in &self.rules {
            if !rule.is_valid(ctx) {
                debug!(rule = rule.name(), "Transfer rejected by rule");
                return TransferCode::Rule;
            }
        }

        // Configurations whose limits this transfer would count against.
        // Only these need a usable rate.
        let limited: Vec<&AuditConfiguration> = self
            .registry
            .configurations()
            .filter(|cfg| {
                cfg.has_limits() && self.registry.audit_fires(cfg.id, &ctx.sender, &ctx.receiver)
            })
            .collect();

        for cfg in &limited {
            if cfg.needs_rate(&ctx.token_currency) && self.normalize(cfg, ctx).is_none() {
                debug!(config = %cfg.id, currency = %cfg.reference_currency, "No valid rate");
                return TransferCode::InvalidRate;
            }
        }

        if self.config.enforce_identity {
            if !self.has_valid_identity(&ctx.sender, ctx) {
                return TransferCode::NonRegisteredSender;
            }
            if !self.has_valid_identity(&ctx.receiver, ctx) {
                return TransferCode::NonRegisteredReceiver;
            }
        }

        for cfg in &limited {
            if let Some(limit) = cfg.emission_limit {
                if self.would_exceed(cfg, ctx, &ctx.sender, limit, true) {
                    debug!(config = %cfg.id, "Emission limit reached");
                    return TransferCode::LimitedEmission;
                }
            }
        }

        for cfg in &limited {
            if let Some(limit) = cfg.reception_limit {
                if self.would_exceed(cfg, ctx, &ctx.receiver, limit, false) {
                    debug!(config = %cfg.id, "Reception limit reached");
                    return TransferCode::LimitedReception;
                }
            }
        }

        TransferCode::Ok
    }

    fn has_valid_identity(&self, address: &Address, ctx: &TransferContext) -> bool {
        self.identity
            .resolve(address)
            .is_some_and(|identity| identity.is_valid_at(ctx.now))
    }

    /// Would crediting this transfer push the party's cumulated volume
    /// past the limit? Addition overflow counts as exceeded.
    fn would_exceed(
        &self,
        cfg: &AuditConfiguration,
        ctx: &TransferContext,
        party: &Address,
        limit: tokentrail_core::Amount,
        emission: bool,
    ) -> bool {
        // The rate check above guaranteed a rate for every limited
        // firing configuration, so normalization cannot fail here; if
        // the invariant ever breaks, reject rather than wave through.
        let Some(normalized) = self.normalize(cfg, ctx) else {
            return true;
        };

        let key = RecordKey::new(
            self.scope_for(cfg, &ctx.token),
            cfg.id,
            self.holder_for(cfg, party),
        );
        let record = self.ledger.get(&key);
        let current = if emission {
            record.cumulated_emission
        } else {
            record.cumulated_reception
        };

        match current.checked_add(normalized) {
            Some(total) => total > limit,
            None => true,
        }
    }
}
