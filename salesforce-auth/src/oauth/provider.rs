//! OAuth provider trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{PkceChallenge, PkceVerifier, Tokens};
use crate::error::Error;

/// Authorization request with the URL to send the browser to.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Authorization URL to redirect the user to.
    pub url: String,
    /// State parameter embedded in the URL.
    pub state: String,
}

/// Postal address claim of the userinfo response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// User information retrieved from the OAuth provider.
///
/// Claims the relay relies on are typed; everything else the provider sends
/// is kept in `extra` and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Provider's subject identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// User's display name.
    #[serde(default)]
    pub name: String,
    /// User's email address.
    #[serde(default)]
    pub email: String,
    /// Whether the email is verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    /// User's profile picture URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Trait for OAuth 2.0 providers.
///
/// Implementations handle the authorization code flow with PKCE:
/// - Authorization URL generation
/// - Authorization code exchange for tokens
/// - User info retrieval
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate authorization URL with state and PKCE challenge.
    fn authorization_url(
        &self,
        state: &str,
        pkce_challenge: &PkceChallenge,
    ) -> Result<AuthorizationRequest, Error>;

    /// Exchange an authorization code and the matching PKCE verifier for tokens.
    async fn exchange_code(&self, code: &str, pkce_verifier: &PkceVerifier)
        -> Result<Tokens, Error>;

    /// Get user information using freshly issued tokens.
    async fn get_user_info(&self, tokens: &Tokens) -> Result<UserInfo, Error>;
}
