//! Audit records and the field mask controlling which parts of a record
//! a configuration may mutate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use thiserror::Error;

use tokentrail_core::Amount;

use crate::error::{LedgerError, LedgerResult};

/// Transfer direction relative to the record holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The holder sent the amount
    Emission,
    /// The holder received the amount
    Reception,
}

/// Error raised when decoding a field mask with unknown bits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field mask bits: {0:#04x}")]
pub struct UnknownFieldBits(pub u8);

/// Mask over the six [`AuditRecord`] fields.
///
/// Two configurations may share the same key space while each owning a
/// disjoint subset of fields, e.g. one tracking only timestamps and
/// another only cumulative volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FieldSet(u8);

impl FieldSet {
    pub const CREATED_AT: FieldSet = FieldSet(1 << 0);
    pub const LAST_TRANSACTION_AT: FieldSet = FieldSet(1 << 1);
    pub const LAST_EMISSION_AT: FieldSet = FieldSet(1 << 2);
    pub const LAST_RECEPTION_AT: FieldSet = FieldSet(1 << 3);
    pub const CUMULATED_EMISSION: FieldSet = FieldSet(1 << 4);
    pub const CUMULATED_RECEPTION: FieldSet = FieldSet(1 << 5);

    /// No fields
    pub const NONE: FieldSet = FieldSet(0);
    /// All six fields
    pub const ALL: FieldSet = FieldSet(0x3f);
    /// The four timestamp fields
    pub const TIMESTAMPS: FieldSet = FieldSet(0x0f);
    /// The two cumulative volume fields
    pub const VOLUMES: FieldSet = FieldSet(0x30);

    /// Check whether every field in `other` is included
    pub fn contains(&self, other: FieldSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when no field is selected
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Raw mask bits
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl BitOr for FieldSet {
    type Output = FieldSet;

    fn bitor(self, rhs: FieldSet) -> FieldSet {
        FieldSet(self.0 | rhs.0)
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        FieldSet::ALL
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

impl TryFrom<u8> for FieldSet {
    type Error = UnknownFieldBits;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits & !Self::ALL.0 != 0 {
            Err(UnknownFieldBits(bits))
        } else {
            Ok(FieldSet(bits))
        }
    }
}

impl From<FieldSet> for u8 {
    fn from(set: FieldSet) -> u8 {
        set.0
    }
}

/// One cumulative counter set.
///
/// The default value is the zero record; a key with no prior write
/// behaves exactly like one explicitly reset. Timestamps use `None` as
/// the "never written" zero so `created_at` can be set exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Timestamp of the first write; set once, never overwritten
    pub created_at: Option<DateTime<Utc>>,
    /// Timestamp of the most recent write in either direction
    pub last_transaction_at: Option<DateTime<Utc>>,
    /// Timestamp of the most recent emission write
    pub last_emission_at: Option<DateTime<Utc>>,
    /// Timestamp of the most recent reception write
    pub last_reception_at: Option<DateTime<Utc>>,
    /// Monotonic non-decreasing emitted volume, in the configuration's
    /// reference currency
    pub cumulated_emission: Amount,
    /// Monotonic non-decreasing received volume, in the configuration's
    /// reference currency
    pub cumulated_reception: Amount,
}

impl AuditRecord {
    /// True when the record is indistinguishable from a never-written key
    pub fn is_zero(&self) -> bool {
        *self == AuditRecord::default()
    }

    /// Apply one write, honoring the field mask.
    ///
    /// `created_at` is only set while unset; `last_transaction_at` is
    /// refreshed unconditionally when masked; the direction decides
    /// which of the per-direction timestamp and cumulated fields move.
    pub fn apply(
        &mut self,
        direction: Direction,
        delta: Amount,
        fields: FieldSet,
        now: DateTime<Utc>,
    ) -> LedgerResult<()> {
        if fields.contains(FieldSet::CREATED_AT) && self.created_at.is_none() {
            self.created_at = Some(now);
        }

        if fields.contains(FieldSet::LAST_TRANSACTION_AT) {
            self.last_transaction_at = Some(now);
        }

        match direction {
            Direction::Emission => {
                if fields.contains(FieldSet::LAST_EMISSION_AT) {
                    self.last_emission_at = Some(now);
                }
                if fields.contains(FieldSet::CUMULATED_EMISSION) {
                    self.cumulated_emission = self
                        .cumulated_emission
                        .checked_add(delta)
                        .ok_or(LedgerError::Overflow { field: "emission" })?;
                }
            }
            Direction::Reception => {
                if fields.contains(FieldSet::LAST_RECEPTION_AT) {
                    self.last_reception_at = Some(now);
                }
                if fields.contains(FieldSet::CUMULATED_RECEPTION) {
                    self.cumulated_reception = self
                        .cumulated_reception
                        .checked_add(delta)
                        .ok_or(LedgerError::Overflow { field: "reception" })?;
                }
            }
        }

        Ok(())
    }
}
