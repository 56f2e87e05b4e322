//! Login flow and session rules for the relay.
//!
//! This crate sits between `web` and `salesforce-auth`: controllers call the
//! functions here, and errors from lower layers are translated into
//! `domain::error::Error` before they reach `web`.

// Re-exports from `salesforce-auth` that callers of `domain` need.
pub use salesforce_auth::oauth::{Provider, UserInfo};

pub mod error;
pub mod gateway;
pub mod login;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
