//! `reqwest::Client` construction for calls to the provider.
//!
//! Requests are never retried. An authorization code is single-use, so a second
//! exchange attempt can only fail.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpClientBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: format!("salesforce-auth/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Whole-request timeout. The connect timeout never exceeds it.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a rustls client that asks for JSON and does not follow redirects.
    pub fn build(self) -> Result<reqwest::Client, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .redirect(Policy::none())
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout.min(self.timeout))
            .user_agent(self.user_agent)
            .build()
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let builder = HttpClientBuilder::new();
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
        assert_eq!(builder.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert!(builder.user_agent.starts_with("salesforce-auth/"));
    }

    #[test]
    fn test_overrides() {
        let builder = HttpClientBuilder::new()
            .with_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(2))
            .with_user_agent("relay/1");
        assert_eq!(builder.timeout, Duration::from_secs(5));
        assert_eq!(builder.connect_timeout, Duration::from_secs(2));
        assert_eq!(builder.user_agent, "relay/1");
    }

    #[tokio::test]
    async fn test_client_does_not_follow_redirects() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/services/oauth2/userinfo")
            .match_header("accept", "application/json")
            .with_status(302)
            .with_header("location", "https://elsewhere.test/collect")
            .create_async()
            .await;

        let client = HttpClientBuilder::new().build().unwrap();
        let response = client
            .get(format!("{}/services/oauth2/userinfo", server.url()))
            .send()
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), reqwest::StatusCode::FOUND);
    }
}
