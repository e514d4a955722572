//! Oracle gateway types and capability traits

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tokentrail_core::{Address, Amount, Currency, IdentityId};

/// A registered, possibly time-limited identity resolved from an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The registered identity id
    pub id: IdentityId,
    /// Registration lapses at this instant
    pub valid_until: DateTime<Utc>,
}

impl Identity {
    pub fn new(id: IdentityId, valid_until: DateTime<Utc>) -> Self {
        Self { id, valid_until }
    }

    /// True while the registration has not lapsed
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.valid_until
    }
}

/// A positive conversion rate between two currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate(Decimal);

impl Rate {
    /// Create a rate; zero or negative rates are not valid rates and
    /// return None.
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Identity lookup capability.
///
/// Lookups are synchronous, in-process calls; a missing or lapsed
/// registration is an ordinary `None`/invalid outcome, never an error.
pub trait IdentityResolver: Send + Sync {
    /// Resolve an address to its registered identity, if any
    fn resolve(&self, address: &Address) -> Option<Identity>;
}

/// Currency conversion capability.
///
/// "No valid rate" is modeled as `None`; the caller decides whether that
/// is a policy rejection (read path) or an infrastructure failure
/// (write path).
pub trait RatesProvider: Send + Sync {
    /// Current rate from one currency to another, if a valid one exists
    fn rate(&self, from: &Currency, to: &Currency) -> Option<Rate>;

    /// Normalize an amount from one currency into another.
    ///
    /// Identical currencies convert 1:1 without a stored rate.
    fn convert(&self, amount: Amount, from: &Currency, to: &Currency) -> Option<Amount> {
        if from == to {
            return Some(amount);
        }
        let rate = self.rate(from, to)?;
        amount.checked_mul(rate.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_identity_validity_horizon() {
        let now = Utc::now();
        let identity = Identity::new(IdentityId(1), now + chrono::Duration::days(1));

        assert!(identity.is_valid_at(now));
        assert!(!identity.is_valid_at(now + chrono::Duration::days(2)));
        // The lapse instant itself is no longer valid
        assert!(!identity.is_valid_at(identity.valid_until));
    }

    #[test]
    fn test_rate_rejects_non_positive() {
        assert!(Rate::new(dec!(0)).is_none());
        assert!(Rate::new(dec!(-1.5)).is_none());
        assert_eq!(Rate::new(dec!(1.5)).unwrap().value(), dec!(1.5));
    }

    struct FixedRate(Option<Rate>);

    impl RatesProvider for FixedRate {
        fn rate(&self, _from: &Currency, _to: &Currency) -> Option<Rate> {
            self.0
        }
    }

    #[test]
    fn test_convert_identity_currency_needs_no_rate() {
        let provider = FixedRate(None);
        let tkn = Currency::Token("TKN".to_string());
        let amount = Amount::new(dec!(3333)).unwrap();

        assert_eq!(provider.convert(amount, &tkn, &tkn), Some(amount));
    }

    #[test]
    fn test_convert_applies_rate() {
        let provider = FixedRate(Rate::new(dec!(2)));
        let tkn = Currency::Token("TKN".to_string());
        let amount = Amount::new(dec!(100)).unwrap();

        let converted = provider.convert(amount, &tkn, &Currency::Chf).unwrap();
        assert_eq!(converted.value(), dec!(200));
    }

    #[test]
    fn test_convert_without_rate_is_none() {
        let provider = FixedRate(None);
        let tkn = Currency::Token("TKN".to_string());
        let amount = Amount::new(dec!(100)).unwrap();

        assert!(provider.convert(amount, &tkn, &Currency::Chf).is_none());
    }
}
