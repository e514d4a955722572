//! Mock oracle for tests and in-process stubs.
//!
//! Stores settable identities and rates behind interior mutability so a
//! test can flip oracle state mid-scenario without rebuilding the
//! engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::RwLock;

use tokentrail_core::{Address, Currency, IdentityId};

use crate::types::{Identity, IdentityResolver, Rate, RatesProvider};

/// Mock identity registry and rates provider
#[derive(Debug, Default)]
pub struct MockOracle {
    identities: RwLock<HashMap<Address, Identity>>,
    rates: RwLock<HashMap<(Currency, Currency), Rate>>,
}

impl MockOracle {
    /// Create an empty mock oracle
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identity for an address
    pub fn set_identity(&self, address: Address, id: IdentityId, valid_until: DateTime<Utc>) {
        let mut identities = self.identities.write().unwrap();
        identities.insert(address, Identity::new(id, valid_until));
    }

    /// Remove an address's registration
    pub fn revoke_identity(&self, address: &Address) {
        let mut identities = self.identities.write().unwrap();
        identities.remove(address);
    }

    /// Set a conversion rate; non-positive values clear the rate, which
    /// is how tests model "rate = 0, no valid rate".
    pub fn set_rate(&self, from: Currency, to: Currency, value: Decimal) {
        let mut rates = self.rates.write().unwrap();
        match Rate::new(value) {
            Some(rate) => {
                rates.insert((from, to), rate);
            }
            None => {
                rates.remove(&(from, to));
            }
        }
    }

    /// Remove a rate (for testing the no-valid-rate path)
    pub fn remove_rate(&self, from: &Currency, to: &Currency) {
        let mut rates = self.rates.write().unwrap();
        rates.remove(&(from.clone(), to.clone()));
    }

    /// Number of registered identities
    pub fn identity_count(&self) -> usize {
        self.identities.read().unwrap().len()
    }
}

impl IdentityResolver for MockOracle {
    fn resolve(&self, address: &Address) -> Option<Identity> {
        let identities = self.identities.read().unwrap();
        identities.get(address).copied()
    }
}

impl RatesProvider for MockOracle {
    fn rate(&self, from: &Currency, to: &Currency) -> Option<Rate> {
        let rates = self.rates.read().unwrap();
        rates.get(&(from.clone(), to.clone())).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tokentrail_core::Amount;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_unregistered_address_resolves_to_none() {
        let oracle = MockOracle::new();
        assert!(oracle.resolve(&addr("alice")).is_none());
    }

    #[test]
    fn test_set_and_revoke_identity() {
        let oracle = MockOracle::new();
        let until = Utc::now() + chrono::Duration::days(30);

        oracle.set_identity(addr("alice"), IdentityId(7), until);
        let identity = oracle.resolve(&addr("alice")).unwrap();
        assert_eq!(identity.id, IdentityId(7));
        assert_eq!(oracle.identity_count(), 1);

        oracle.revoke_identity(&addr("alice"));
        assert!(oracle.resolve(&addr("alice")).is_none());
    }

    #[test]
    fn test_set_rate_and_convert() {
        let oracle = MockOracle::new();
        let tkn = Currency::Token("TKN".to_string());

        oracle.set_rate(tkn.clone(), Currency::Chf, dec!(1.5));

        let converted = oracle
            .convert(Amount::new(dec!(100)).unwrap(), &tkn, &Currency::Chf)
            .unwrap();
        assert_eq!(converted.value(), dec!(150));
    }

    #[test]
    fn test_zero_rate_clears_rate() {
        let oracle = MockOracle::new();
        let tkn = Currency::Token("TKN".to_string());

        oracle.set_rate(tkn.clone(), Currency::Chf, dec!(1.5));
        oracle.set_rate(tkn.clone(), Currency::Chf, dec!(0));

        assert!(oracle.rate(&tkn, &Currency::Chf).is_none());
    }

    #[test]
    fn test_remove_rate() {
        let oracle = MockOracle::new();
        let tkn = Currency::Token("TKN".to_string());

        oracle.set_rate(tkn.clone(), Currency::Eur, dec!(2));
        oracle.remove_rate(&tkn, &Currency::Eur);

        assert!(oracle
            .convert(Amount::new(dec!(1)).unwrap(), &tkn, &Currency::Eur)
            .is_none());
    }
}
