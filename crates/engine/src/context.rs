//! Transfer context - the prospective transfer under evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tokentrail_core::{Address, Amount, Currency};

/// A prospective transfer, as handed over by the proxy/core layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferContext {
    /// The token being transferred; also the per-token ledger scope
    pub token: Address,

    /// The unit the token is denominated in, the source currency for
    /// normalization
    pub token_currency: Currency,

    /// Sending address
    pub sender: Address,

    /// Receiving address
    pub receiver: Address,

    /// Transferred amount in token units
    pub amount: Amount,

    /// Evaluation instant; lock windows, freezes, identity validity and
    /// ledger timestamps all use this
    pub now: DateTime<Utc>,
}

impl TransferContext {
    /// Create a context evaluated at the current instant
    pub fn new(
        token: Address,
        token_currency: Currency,
        sender: Address,
        receiver: Address,
        amount: Amount,
    ) -> Self {
        Self {
            token,
            token_currency,
            sender,
            receiver,
            amount,
            now: Utc::now(),
        }
    }

    /// Pin the evaluation instant (for replay and tests)
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_context_creation() {
        let ctx = TransferContext::new(
            addr("token"),
            Currency::Token("TKN".to_string()),
            addr("alice"),
            addr("bob"),
            Amount::new(dec!(3333)).unwrap(),
        );

        assert_eq!(ctx.token.as_str(), "token");
        assert_eq!(ctx.sender.as_str(), "alice");
        assert_eq!(ctx.receiver.as_str(), "bob");
        assert_eq!(ctx.amount.value(), dec!(3333));
    }

    #[test]
    fn test_with_now_pins_instant() {
        let pinned = Utc::now() - chrono::Duration::days(1);
        let ctx = TransferContext::new(
            addr("token"),
            Currency::Token("TKN".to_string()),
            addr("alice"),
            addr("bob"),
            Amount::ZERO,
        )
        .with_now(pinned);

        assert_eq!(ctx.now, pinned);
    }

    #[test]
    fn test_context_serialization() {
        let ctx = TransferContext::new(
            addr("token"),
            Currency::Chf,
            addr("alice"),
            addr("bob"),
            Amount::new(dec!(100)).unwrap(),
        );

        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("alice"));

        let parsed: TransferContext = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sender, ctx.sender);
        assert_eq!(parsed.amount, ctx.amount);
    }
}
