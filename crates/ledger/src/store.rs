//! The keyed record store.
//!
//! One module owns every record; configurations only reference rows
//! through keys and a field mask. Reads default to the zero record, so
//! the absence ≡ zero invariant is mechanical rather than conventional.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use tokentrail_core::{Address, Amount, ConfigId};

use crate::error::LedgerResult;
use crate::key::RecordKey;
use crate::record::{AuditRecord, Direction, FieldSet};

/// One staged ledger write, resolved by the update procedure before any
/// record is touched.
#[derive(Debug, Clone)]
pub struct PlannedWrite {
    pub key: RecordKey,
    pub direction: Direction,
    /// Delta already normalized into the configuration's reference
    /// currency
    pub delta: Amount,
    pub fields: FieldSet,
    pub at: DateTime<Utc>,
}

/// Sparse store of [`AuditRecord`]s.
///
/// Mutated only through [`apply`](AuditLedger::apply) /
/// [`apply_all`](AuditLedger::apply_all) and the administrative
/// [`reset_scope`](AuditLedger::reset_scope); every read path returns a
/// value, never a reference into the map.
#[derive(Debug, Default)]
pub struct AuditLedger {
    records: HashMap<RecordKey, AuditRecord>,
}

impl AuditLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a record; absent keys return the zero record.
    pub fn get(&self, key: &RecordKey) -> AuditRecord {
        self.records.get(key).cloned().unwrap_or_default()
    }

    /// Apply a single write. The stored record only changes if the whole
    /// write succeeds.
    pub fn apply(
        &mut self,
        key: &RecordKey,
        direction: Direction,
        delta: Amount,
        fields: FieldSet,
        now: DateTime<Utc>,
    ) -> LedgerResult<()> {
        let mut record = self.get(key);
        record.apply(direction, delta, fields, now)?;

        tracing::trace!(key = %key, ?direction, delta = %delta, fields = %fields, "Ledger write");
        self.records.insert(key.clone(), record);
        Ok(())
    }

    /// Apply a batch of writes all-or-nothing.
    ///
    /// Every write mutates a staged copy first; the store is only
    /// touched once the whole batch has succeeded. A transfer that
    /// fans out over several configurations either lands completely or
    /// not at all.
    pub fn apply_all(&mut self, writes: &[PlannedWrite]) -> LedgerResult<()> {
        let mut staged: HashMap<RecordKey, AuditRecord> = HashMap::new();

        for write in writes {
            let record = staged
                .entry(write.key.clone())
                .or_insert_with(|| self.get(&write.key));
            record.apply(write.direction, write.delta, write.fields, write.at)?;
        }

        for key in staged.keys() {
            tracing::trace!(key = %key, "Ledger commit");
        }
        self.records.extend(staged);
        Ok(())
    }

    /// Delete every record filed under (scope, configuration).
    ///
    /// Returns the number of records removed. Used when a token is
    /// reassigned to a different configuration set.
    pub fn reset_scope(&mut self, scope: &Address, config: ConfigId) -> usize {
        let before = self.records.len();
        self.records
            .retain(|key, _| !(key.scope == *scope && key.config == config));
        let removed = before - self.records.len();

        tracing::debug!(scope = %scope, config = %config, removed, "Scope reset");
        removed
    }

    /// Number of materialized records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no record has been materialized
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::HolderKey;
    use rust_decimal_macros::dec;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn amount(d: rust_decimal::Decimal) -> Amount {
        Amount::new(d).unwrap()
    }

    fn sender_key() -> RecordKey {
        RecordKey::new(
            addr("token"),
            ConfigId(0),
            HolderKey::Address(addr("alice")),
        )
    }

    #[test]
    fn test_absent_key_reads_zero() {
        let ledger = AuditLedger::new();
        let record = ledger.get(&sender_key());
        assert!(record.is_zero());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_apply_then_get() {
        let mut ledger = AuditLedger::new();
        let now = Utc::now();

        ledger
            .apply(
                &sender_key(),
                Direction::Emission,
                amount(dec!(3333)),
                FieldSet::ALL,
                now,
            )
            .unwrap();

        let record = ledger.get(&sender_key());
        assert_eq!(record.cumulated_emission.value(), dec!(3333));
        assert_eq!(record.created_at, Some(now));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_apply_all_atomic_batch() {
        let mut ledger = AuditLedger::new();
        let now = Utc::now();
        let shared = RecordKey::shared(addr("token"), ConfigId(0));

        let writes = vec![
            PlannedWrite {
                key: shared.clone(),
                direction: Direction::Emission,
                delta: amount(dec!(3333)),
                fields: FieldSet::ALL,
                at: now,
            },
            PlannedWrite {
                key: shared.clone(),
                direction: Direction::Reception,
                delta: amount(dec!(3333)),
                fields: FieldSet::ALL,
                at: now,
            },
            PlannedWrite {
                key: sender_key(),
                direction: Direction::Emission,
                delta: amount(dec!(3333)),
                fields: FieldSet::ALL,
                at: now,
            },
        ];

        ledger.apply_all(&writes).unwrap();

        let shared_record = ledger.get(&shared);
        assert_eq!(shared_record.cumulated_emission.value(), dec!(3333));
        assert_eq!(shared_record.cumulated_reception.value(), dec!(3333));
        assert_eq!(
            ledger.get(&sender_key()).cumulated_emission.value(),
            dec!(3333)
        );
    }

    #[test]
    fn test_apply_all_failure_leaves_store_untouched() {
        let mut ledger = AuditLedger::new();
        let now = Utc::now();
        let near_max = Amount::new(rust_decimal::Decimal::MAX).unwrap();

        ledger
            .apply(
                &sender_key(),
                Direction::Emission,
                near_max,
                FieldSet::ALL,
                now,
            )
            .unwrap();
        let before = ledger.get(&sender_key());

        // First write in the batch is fine, second overflows
        let writes = vec![
            PlannedWrite {
                key: RecordKey::shared(addr("token"), ConfigId(0)),
                direction: Direction::Emission,
                delta: amount(dec!(1)),
                fields: FieldSet::ALL,
                at: now,
            },
            PlannedWrite {
                key: sender_key(),
                direction: Direction::Emission,
                delta: amount(dec!(1)),
                fields: FieldSet::ALL,
                at: now,
            },
        ];

        assert!(ledger.apply_all(&writes).is_err());
        assert_eq!(ledger.get(&sender_key()), before);
        assert!(ledger
            .get(&RecordKey::shared(addr("token"), ConfigId(0)))
            .is_zero());
    }

    #[test]
    fn test_reset_scope_restores_zero() {
        let mut ledger = AuditLedger::new();
        let now = Utc::now();

        ledger
            .apply(
                &sender_key(),
                Direction::Emission,
                amount(dec!(100)),
                FieldSet::ALL,
                now,
            )
            .unwrap();

        let other_config = RecordKey::new(
            addr("token"),
            ConfigId(1),
            HolderKey::Address(addr("alice")),
        );
        ledger
            .apply(
                &other_config,
                Direction::Emission,
                amount(dec!(100)),
                FieldSet::ALL,
                now,
            )
            .unwrap();

        let removed = ledger.reset_scope(&addr("token"), ConfigId(0));
        assert_eq!(removed, 1);

        // Reset key reads exactly like a never-written one
        assert_eq!(ledger.get(&sender_key()), AuditRecord::default());
        // Other configuration untouched
        assert_eq!(
            ledger.get(&other_config).cumulated_emission.value(),
            dec!(100)
        );
    }

    #[test]
    fn test_reset_scope_on_empty_ledger() {
        let mut ledger = AuditLedger::new();
        assert_eq!(ledger.reset_scope(&addr("token"), ConfigId(0)), 0);
    }
}
