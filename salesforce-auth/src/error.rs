//! Errors raised while talking to the provider.

use std::error::Error as StdError;
use std::fmt;

/// Root error of this crate: what went wrong, plus the underlying cause if any.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// The provider answered, but not with what the flow needs.
    OAuth(OAuthErrorKind),
    /// The provider could not be reached or did not answer in time.
    Http(HttpErrorKind),
}

#[derive(Debug, PartialEq)]
pub enum OAuthErrorKind {
    /// The provider rejected the authorization code exchange.
    TokenExchangeFailed,
    /// The userinfo endpoint could not produce a profile.
    UserInfoFailed,
    /// A provider response body could not be decoded.
    InvalidResponse,
    /// Endpoint URLs or client settings cannot form a request.
    InvalidConfiguration,
}

#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    Builder,
    Connect,
    Timeout,
    Request,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed) => "token exchange rejected",
            ErrorKind::OAuth(OAuthErrorKind::UserInfoFailed) => "userinfo request failed",
            ErrorKind::OAuth(OAuthErrorKind::InvalidResponse) => "unreadable provider response",
            ErrorKind::OAuth(OAuthErrorKind::InvalidConfiguration) => "invalid provider configuration",
            ErrorKind::Http(HttpErrorKind::Builder) => "could not build request",
            ErrorKind::Http(HttpErrorKind::Connect) => "could not connect to provider",
            ErrorKind::Http(HttpErrorKind::Timeout) => "provider request timed out",
            ErrorKind::Http(HttpErrorKind::Request) => "provider request failed",
        };
        f.write_str(message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{} ({:?}): {}", self.error_kind, self.error_kind, source),
            None => write!(f, "{} ({:?})", self.error_kind, self.error_kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::Builder)
        } else if err.is_timeout() {
            ErrorKind::Http(HttpErrorKind::Timeout)
        } else if err.is_connect() {
            ErrorKind::Http(HttpErrorKind::Connect)
        } else if err.is_decode() {
            ErrorKind::OAuth(OAuthErrorKind::InvalidResponse)
        } else {
            ErrorKind::Http(HttpErrorKind::Request)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidConfiguration),
        }
    }
}

/// An OAuth error carrying `message` as its source.
pub fn oauth_error(kind: OAuthErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}
