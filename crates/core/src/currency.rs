//! Currency - typed reference-currency and token-unit codes.
//!
//! Audit configurations normalize transferred amounts into a reference
//! currency before accumulating them. Reference currencies are usually
//! fiat; the unit a token itself is denominated in is carried as a
//! `Token` code. Raw strings are parsed once at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing currency codes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Empty currency code")]
    EmptyCode,

    #[error("Currency code too long (max 10 chars): {0}")]
    TooLong(String),

    #[error("Invalid currency code format: {0}")]
    InvalidFormat(String),
}

/// Currency codes.
///
/// The fiat currencies configurations commonly normalize into are
/// pre-defined; anything else (including a token's own unit) is a
/// `Token` code.
///
/// # Examples
/// ```
/// use tokentrail_core::Currency;
///
/// let chf: Currency = "CHF".parse().unwrap();
/// assert_eq!(chf, Currency::Chf);
///
/// let unit: Currency = "TKN".parse().unwrap();
/// assert!(matches!(unit, Currency::Token(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Swiss Franc
    Chf,
    /// Japanese Yen
    Jpy,
    /// A token unit or any other currency code
    Token(String),
}

impl Currency {
    /// Returns the currency code as a string slice
    pub fn code(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Jpy => "JPY",
            Currency::Token(s) => s.as_str(),
        }
    }

    /// Returns true if this is a pre-defined fiat currency
    pub fn is_fiat(&self) -> bool {
        !matches!(self, Currency::Token(_))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_uppercase();

        if s.is_empty() {
            return Err(CurrencyError::EmptyCode);
        }

        if s.len() > 10 {
            return Err(CurrencyError::TooLong(s));
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CurrencyError::InvalidFormat(s));
        }

        Ok(match s.as_str() {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "CHF" => Currency::Chf,
            "JPY" => Currency::Jpy,
            _ => Currency::Token(s),
        })
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fiat() {
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("chf".parse::<Currency>().unwrap(), Currency::Chf);
        assert_eq!("Eur".parse::<Currency>().unwrap(), Currency::Eur);
    }

    #[test]
    fn test_parse_token_code() {
        let unit: Currency = "TKN".parse().unwrap();
        assert_eq!(unit, Currency::Token("TKN".to_string()));
        assert_eq!(unit.to_string(), "TKN");
    }

    #[test]
    fn test_is_fiat() {
        assert!(Currency::Chf.is_fiat());
        assert!(!Currency::Token("TKN".to_string()).is_fiat());
    }

    #[test]
    fn test_empty_code_error() {
        let result: Result<Currency, _> = "".parse();
        assert!(matches!(result, Err(CurrencyError::EmptyCode)));
    }

    #[test]
    fn test_too_long_error() {
        let result: Result<Currency, _> = "VERYLONGCURRENCYNAME".parse();
        assert!(matches!(result, Err(CurrencyError::TooLong(_))));
    }

    #[test]
    fn test_invalid_format_error() {
        let result: Result<Currency, _> = "USD/CHF".parse();
        assert!(matches!(result, Err(CurrencyError::InvalidFormat(_))));
    }

    #[test]
    fn test_serde_roundtrip() {
        let currencies = vec![
            Currency::Usd,
            Currency::Chf,
            Currency::Token("TKN".to_string()),
        ];

        for currency in currencies {
            let json = serde_json::to_string(&currency).unwrap();
            let parsed: Currency = serde_json::from_str(&json).unwrap();
            assert_eq!(currency, parsed);
        }
    }
}
