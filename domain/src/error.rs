//! Error types for the `domain` layer.
use salesforce_auth::error::{
    Error as SalesforceAuthError, ErrorKind as SalesforceAuthErrorKind, OAuthErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. `web` maps the `error_kind`s to HTTP status codes and messages
/// without depending on `salesforce-auth` error types directly.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// The caller sent a request that cannot be processed as is.
    Input(InputErrorKind),
    /// The presented bearer token does not belong to a live session.
    Unauthorized,
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the ways a caller's request can be incomplete or stale.
#[derive(Debug, PartialEq)]
pub enum InputErrorKind {
    MissingAuthorizationCode,
    MissingToken,
    /// The state parameter is absent, unknown, already used, or expired.
    InvalidState,
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    Other(String),
}

impl Error {
    pub(crate) fn input(kind: InputErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Input(kind),
        }
    }

    pub(crate) fn unauthorized() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Unauthorized,
        }
    }

    pub(crate) fn config() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `salesforce-auth` layer to the `domain` layer.
impl From<SalesforceAuthError> for Error {
    fn from(err: SalesforceAuthError) -> Self {
        let error_kind = match &err.error_kind {
            SalesforceAuthErrorKind::Http(_) => {
                DomainErrorKind::External(ExternalErrorKind::Network)
            }
            SalesforceAuthErrorKind::OAuth(OAuthErrorKind::InvalidConfiguration) => {
                DomainErrorKind::Internal(InternalErrorKind::Config)
            }
            SalesforceAuthErrorKind::OAuth(_) => {
                DomainErrorKind::External(ExternalErrorKind::Other("OAuth error".to_string()))
            }
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}
