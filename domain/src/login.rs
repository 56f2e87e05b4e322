//! The authorization code + PKCE login flow.
//!
//! `authorize_url` starts an attempt and `complete` finishes it when the
//! provider redirects back. Each attempt carries its own verifier and return
//! origin under its state token, so concurrent logins never interfere.

use crate::error::{DomainErrorKind, Error, InputErrorKind, InternalErrorKind};
use crate::store::Stores;
use log::*;
use salesforce_auth::oauth::{PkceVerifier, Provider, StateManager};
use secrecy::ExposeSecret;
use service::config::Config;
use url::Url;

/// Pick the origin the browser returns to once the login completes.
///
/// The caller's origin is used only if it is allowed; anything else falls back
/// to the configured frontend so the relay cannot be used as an open redirect.
pub fn resolve_origin(config: &Config, caller_origin: Option<&str>) -> String {
    match caller_origin {
        Some(origin) if config.is_allowed_origin(origin) => origin.to_string(),
        Some(origin) => {
            warn!(
                "Login requested from disallowed origin {origin}, returning to {}",
                config.frontend_base_url()
            );
            config.frontend_base_url().to_string()
        }
        None => config.frontend_base_url().to_string(),
    }
}

/// Start a login attempt and return the provider authorization URL.
pub fn authorize_url(
    config: &Config,
    provider: &dyn Provider,
    states: &StateManager,
    caller_origin: Option<&str>,
) -> Result<String, Error> {
    let origin = resolve_origin(config, caller_origin);
    let verifier = PkceVerifier::generate();
    let challenge = verifier.challenge();
    let state = states.generate(origin, verifier);

    let request = provider.authorization_url(&state, &challenge).map_err(|e| {
        // The browser never reaches the provider, so drop the attempt now.
        states.validate(&state);
        warn!("Failed to build Salesforce authorization URL: {:?}", e);
        Error::from(e)
    })?;

    info!("Redirecting browser to Salesforce OAuth");
    Ok(request.url)
}

/// Finish a login attempt from the provider callback.
///
/// Consumes the state token, exchanges the code with the attempt's verifier,
/// fetches the profile and stores the session. Returns the URL of the
/// originating application's home page with the access token attached.
pub async fn complete(
    provider: &dyn Provider,
    stores: &Stores,
    code: Option<&str>,
    state: Option<&str>,
) -> Result<String, Error> {
    // The state is consumed before anything else so it can never be replayed.
    let pending = state.and_then(|s| stores.states.validate(s));

    let code = code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::input(InputErrorKind::MissingAuthorizationCode))?;

    let pending = pending.ok_or_else(|| {
        warn!("OAuth callback with missing, unknown or expired state");
        Error::input(InputErrorKind::InvalidState)
    })?;

    let tokens = provider
        .exchange_code(code, &pending.pkce_verifier)
        .await
        .inspect_err(|e| warn!("Token exchange failed: {:?}", e))?;

    let user_info = provider
        .get_user_info(&tokens)
        .await
        .inspect_err(|e| warn!("Failed to fetch Salesforce user profile: {:?}", e))?;

    let access_token = tokens.access_token.expose_secret();
    stores
        .sessions
        .insert(access_token, user_info, tokens.instance_url.clone());

    info!("Salesforce login completed, returning to {}", pending.origin);
    home_redirect_url(&pending.origin, access_token)
}

fn home_redirect_url(origin: &str, access_token: &str) -> Result<String, Error> {
    let base = format!("{}/", origin.trim_end_matches('/'));
    let mut url = Url::parse(&base)
        .and_then(|base| base.join("home/"))
        .map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(format!(
                "Invalid return origin {origin}"
            ))),
        })?;
    url.query_pairs_mut()
        .append_pair("access_token", access_token);
    Ok(url.into())
}
