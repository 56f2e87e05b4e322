//! OAuth 2.0 authorization code flow with PKCE.

mod pkce;
mod provider;
mod state;
mod tokens;

pub mod providers;

pub use pkce::{PkceChallenge, PkceVerifier, CHALLENGE_METHOD};
pub use provider::{Address, AuthorizationRequest, Provider, UserInfo};
pub use state::{StateData, StateManager};
pub use tokens::Tokens;
