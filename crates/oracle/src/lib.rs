//! TokenTrail Oracle Gateway
//!
//! The engine consumes two oracle capabilities, specified here only at
//! their trait boundary: resolving an address to a registered identity,
//! and converting an amount between currencies at the current rate.
//! [`mock::MockOracle`] implements both for tests and in-process stubs.

pub mod error;
pub mod mock;
pub mod types;

pub use error::OracleError;
pub use mock::MockOracle;
pub use types::{Identity, IdentityResolver, Rate, RatesProvider};
