//! TokenTrail core domain types.
//!
//! Shared vocabulary for the audit ledger, policy registry, and engine
//! crates: validated addresses, identity and configuration ids, a
//! non-negative decimal [`Amount`], and typed [`Currency`] codes.

pub mod amount;
pub mod currency;
pub mod ids;

pub use amount::{Amount, AmountError};
pub use currency::{Currency, CurrencyError};
pub use ids::{Address, AddressError, ConfigId, IdentityId};
