use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::error::{
    DomainErrorKind, Error as DomainError, ExternalErrorKind, InputErrorKind, InternalErrorKind,
};

use crate::response::ErrorBody;

extern crate log;
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match &self.0.error_kind {
            DomainErrorKind::Input(input_error_kind) => match input_error_kind {
                InputErrorKind::MissingAuthorizationCode => {
                    (StatusCode::BAD_REQUEST, "Authorization code not provided")
                }
                InputErrorKind::MissingToken => (StatusCode::BAD_REQUEST, "No active session found"),
                InputErrorKind::InvalidState => {
                    (StatusCode::BAD_REQUEST, "Invalid or expired state parameter")
                }
            },
            DomainErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized access"),
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::Network | ExternalErrorKind::Other(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error during token exchange",
                ),
            },
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Config => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Salesforce OAuth is not configured",
                ),
                InternalErrorKind::Other(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
        }
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("{message}: {:?}", self.0);
        } else {
            debug!("Rejecting request with {status}: {message}");
        }
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(error_kind: DomainErrorKind) -> Error {
        Error(DomainError {
            source: None,
            error_kind,
        })
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                DomainErrorKind::Input(InputErrorKind::MissingAuthorizationCode),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainErrorKind::Input(InputErrorKind::MissingToken),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainErrorKind::Input(InputErrorKind::InvalidState),
                StatusCode::BAD_REQUEST,
            ),
            (DomainErrorKind::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                DomainErrorKind::External(ExternalErrorKind::Network),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainErrorKind::Internal(InternalErrorKind::Config),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (kind, status) in cases {
            assert_eq!(error(kind).into_response().status(), status);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            error(DomainErrorKind::Input(InputErrorKind::MissingAuthorizationCode))
                .status_and_message()
                .1,
            "Authorization code not provided"
        );
        assert_eq!(
            error(DomainErrorKind::Unauthorized).status_and_message().1,
            "Unauthorized access"
        );
    }
}
