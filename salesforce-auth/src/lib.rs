//! # salesforce-auth
//!
//! OAuth 2.0 building blocks for signing users in with Salesforce:
//! - PKCE verifier/challenge generation (RFC 7636)
//! - Single-use, expiring state tokens correlating callbacks with attempts
//! - The Salesforce provider (authorization URL, code exchange, userinfo)
//! - An in-memory session store keyed by bearer token
//! - HTTP client building
//!
//! ## Usage
//!
//! ```rust,ignore
//! use salesforce_auth::{
//!     oauth::{providers::salesforce, PkceVerifier, Provider, StateManager},
//!     session::SessionStore,
//!     http::HttpClientBuilder,
//! };
//! ```

pub mod error;
pub mod http;
pub mod oauth;
pub mod session;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
