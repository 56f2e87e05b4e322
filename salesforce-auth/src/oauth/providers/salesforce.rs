//! Salesforce OAuth provider implementation.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{oauth_error, Error, ErrorKind, OAuthErrorKind};
use crate::oauth::tokens::TokenResponse;
use crate::oauth::{AuthorizationRequest, PkceChallenge, PkceVerifier, Tokens, UserInfo};

const AUTHORIZE_PATH: &str = "/services/oauth2/authorize";
const TOKEN_PATH: &str = "/services/oauth2/token";
const USERINFO_PATH: &str = "/services/oauth2/userinfo";

/// Request to exchange authorization code for tokens
#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    grant_type: &'static str,
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    code_verifier: &'a str,
}

/// Salesforce OAuth provider.
///
/// Talks to the login host for authorization and code exchange, and to the
/// org instance returned with the tokens for user info.
#[derive(Debug)]
pub struct Provider {
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    login_url: String,
    prompt: Option<String>,
    http_client: reqwest::Client,
}

impl Provider {
    /// Create a new Salesforce OAuth provider.
    ///
    /// # Arguments
    ///
    /// * `client_id` - Connected app consumer key
    /// * `client_secret` - Connected app consumer secret
    /// * `redirect_uri` - Callback URL registered on the connected app
    /// * `login_url` - Login host, e.g. `https://login.salesforce.com`
    /// * `http_client` - Client used for the token and userinfo calls
    pub fn new(
        client_id: String,
        client_secret: SecretString,
        redirect_uri: String,
        login_url: &str,
        http_client: reqwest::Client,
    ) -> Result<Self, Error> {
        let login_url = login_url.trim_end_matches('/').to_string();
        Url::parse(&login_url)?;
        Url::parse(&redirect_uri)?;

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            login_url,
            prompt: Some("login".to_string()),
            http_client,
        })
    }

    /// Set the `prompt` parameter sent to the authorization endpoint.
    ///
    /// `None` omits the parameter and lets the provider reuse an existing login.
    pub fn with_prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt.filter(|p| !p.is_empty());
        self
    }

    fn login_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.login_url, path)
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn authorization_url(
        &self,
        state: &str,
        pkce_challenge: &PkceChallenge,
    ) -> Result<AuthorizationRequest, Error> {
        let mut url = Url::parse(&self.login_endpoint(AUTHORIZE_PATH))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", &self.redirect_uri)
                .append_pair("code_challenge", pkce_challenge.as_str())
                .append_pair("code_challenge_method", pkce_challenge.method());
            if let Some(prompt) = &self.prompt {
                query.append_pair("prompt", prompt);
            }
            query.append_pair("state", state);
        }

        Ok(AuthorizationRequest {
            url: url.into(),
            state: state.to_string(),
        })
    }

    async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: &PkceVerifier,
    ) -> Result<Tokens, Error> {
        let request = TokenExchangeRequest {
            grant_type: "authorization_code",
            code,
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
            redirect_uri: &self.redirect_uri,
            code_verifier: pkce_verifier.as_str(),
        };

        debug!("Exchanging Salesforce OAuth code for tokens");

        let response = self
            .http_client
            .post(self.login_endpoint(TOKEN_PATH))
            .header(ACCEPT, "application/json")
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach Salesforce token endpoint: {:?}", e);
                Error::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Salesforce token exchange error ({}): {}", status, error_text);
            return Err(oauth_error(OAuthErrorKind::TokenExchangeFailed, &error_text));
        }

        let tokens: TokenResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Salesforce token response: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidResponse),
            }
        })?;

        info!("Successfully exchanged Salesforce OAuth code for tokens");
        Ok(tokens.into())
    }

    async fn get_user_info(&self, tokens: &Tokens) -> Result<UserInfo, Error> {
        let url = format!("{}{}", tokens.instance_url, USERINFO_PATH);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(tokens.access_token.expose_secret())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("Error fetching Salesforce user info: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: ErrorKind::OAuth(OAuthErrorKind::UserInfoFailed),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Salesforce user info error ({}): {}", status, error_text);
            return Err(oauth_error(
                OAuthErrorKind::UserInfoFailed,
                "Failed to fetch user profile",
            ));
        }

        response.json::<UserInfo>().await.map_err(|e| {
            warn!("Failed to parse Salesforce user info: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::OAuth(OAuthErrorKind::UserInfoFailed),
            }
        })
    }
}
