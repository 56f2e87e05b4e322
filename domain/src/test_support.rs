//! Fixtures shared by the domain unit tests.

use async_trait::async_trait;
use clap::Parser;
use salesforce_auth::error::{oauth_error, Error, OAuthErrorKind};
use salesforce_auth::oauth::{
    AuthorizationRequest, PkceChallenge, PkceVerifier, Provider, Tokens, UserInfo,
};
use secrecy::SecretString;
use service::config::Config;
use std::sync::Mutex;

pub(crate) fn test_config(login_url: &str) -> Config {
    Config::try_parse_from([
        "sf_auth_relay",
        "--allowed-origins",
        "http://localhost:3001",
        "--frontend-base-url",
        "http://localhost:3001",
    ])
    .unwrap()
    .set_salesforce_credentials(
        "client-id".to_string(),
        "client-secret".to_string(),
        "http://localhost:3000/auth/salesforce/callback".to_string(),
    )
    .set_salesforce_login_url(login_url.to_string())
}

/// In-process provider that records what the flow hands it.
pub(crate) struct StubProvider {
    access_token: String,
    fail_authorization_url: bool,
    fail_exchange: bool,
    fail_user_info: bool,
    last_challenge: Mutex<Option<String>>,
    exchanged_verifier: Mutex<Option<PkceVerifier>>,
}

impl StubProvider {
    pub(crate) fn new() -> Self {
        Self {
            access_token: "stub-access-token".to_string(),
            fail_authorization_url: false,
            fail_exchange: false,
            fail_user_info: false,
            last_challenge: Mutex::new(None),
            exchanged_verifier: Mutex::new(None),
        }
    }

    pub(crate) fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = token.to_string();
        self
    }

    pub(crate) fn failing_authorization_url(mut self) -> Self {
        self.fail_authorization_url = true;
        self
    }

    pub(crate) fn failing_exchange(mut self) -> Self {
        self.fail_exchange = true;
        self
    }

    pub(crate) fn failing_user_info(mut self) -> Self {
        self.fail_user_info = true;
        self
    }

    pub(crate) fn last_challenge(&self) -> Option<String> {
        self.last_challenge.lock().unwrap().clone()
    }

    pub(crate) fn exchanged_verifier(&self) -> Option<PkceVerifier> {
        self.exchanged_verifier.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn authorization_url(
        &self,
        state: &str,
        pkce_challenge: &PkceChallenge,
    ) -> Result<AuthorizationRequest, Error> {
        if self.fail_authorization_url {
            return Err(oauth_error(OAuthErrorKind::InvalidConfiguration, "bad url"));
        }
        *self.last_challenge.lock().unwrap() = Some(pkce_challenge.as_str().to_string());
        Ok(AuthorizationRequest {
            url: format!(
                "https://login.test/services/oauth2/authorize?code_challenge={}&code_challenge_method=S256&state={}",
                pkce_challenge.as_str(),
                state
            ),
            state: state.to_string(),
        })
    }

    async fn exchange_code(
        &self,
        _code: &str,
        pkce_verifier: &PkceVerifier,
    ) -> Result<Tokens, Error> {
        if self.fail_exchange {
            return Err(oauth_error(OAuthErrorKind::TokenExchangeFailed, "invalid_grant"));
        }
        *self.exchanged_verifier.lock().unwrap() = Some(pkce_verifier.clone());
        Ok(Tokens {
            access_token: SecretString::from(self.access_token.clone()),
            instance_url: "https://org.test".to_string(),
            id: None,
            token_type: "Bearer".to_string(),
            issued_at: None,
            scopes: vec![],
        })
    }

    async fn get_user_info(&self, _tokens: &Tokens) -> Result<UserInfo, Error> {
        if self.fail_user_info {
            return Err(oauth_error(
                OAuthErrorKind::UserInfoFailed,
                "Failed to fetch user profile",
            ));
        }
        Ok(UserInfo {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        })
    }
}
