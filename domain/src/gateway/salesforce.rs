//! Salesforce OAuth client.
//!
//! Provides a configured Salesforce OAuth provider for domain controllers.

use crate::error::Error;
use log::*;
use salesforce_auth::http::HttpClientBuilder;
use secrecy::SecretString;
use service::config::Config;

pub use salesforce_auth::oauth::providers::salesforce::Provider as SalesforceProvider;

/// Create a new Salesforce OAuth provider from config.
///
/// Fails with an `Internal(Config)` error if the connected app credentials or
/// endpoint URLs are missing or malformed.
///
/// # Example
///
/// ```rust,ignore
/// use domain::gateway::salesforce;
///
/// let provider = salesforce::new_provider(&config)?;
/// ```
pub fn new_provider(config: &Config) -> Result<SalesforceProvider, Error> {
    let client_id = config.salesforce_client_id().ok_or_else(|| {
        warn!("SALESFORCE_CLIENT_ID is not configured");
        Error::config()
    })?;

    let client_secret = config.salesforce_client_secret().ok_or_else(|| {
        warn!("SALESFORCE_CLIENT_SECRET is not configured");
        Error::config()
    })?;

    let redirect_uri = config.salesforce_redirect_uri().ok_or_else(|| {
        warn!("SALESFORCE_REDIRECT_URI is not configured");
        Error::config()
    })?;

    let http_client = HttpClientBuilder::new()
        .with_timeout(config.http_timeout())
        .build()
        .map_err(salesforce_auth::Error::from)?;

    let provider = SalesforceProvider::new(
        client_id,
        SecretString::from(client_secret),
        redirect_uri,
        config.salesforce_login_url(),
        http_client,
    )?
    .with_prompt(config.salesforce_prompt());

    debug!(
        "Configured Salesforce provider against {}",
        config.salesforce_login_url()
    );
    Ok(provider)
}
