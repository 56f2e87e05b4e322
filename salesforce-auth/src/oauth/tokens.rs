//! OAuth token types.

use secrecy::SecretString;
use serde::Deserialize;

/// Tokens issued by the provider's token endpoint.
#[derive(Debug, Clone)]
pub struct Tokens {
    /// Access token for API requests.
    pub access_token: SecretString,
    /// Base URL of the org instance the token is valid against.
    pub instance_url: String,
    /// Identity URL of the authenticated user.
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    pub token_type: String,
    /// Issue time in milliseconds since the epoch, as reported by the provider.
    pub issued_at: Option<String>,
    /// Granted scopes.
    pub scopes: Vec<String>,
}

/// Wire format of a successful token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub instance_url: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl From<TokenResponse> for Tokens {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: SecretString::from(response.access_token),
            instance_url: response.instance_url.trim_end_matches('/').to_string(),
            id: response.id,
            token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
            issued_at: response.issued_at,
            scopes: response
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}
